use actix_web::web;
use std::sync::Arc;

use crate::application::admin::{
  DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};
use crate::application::auth::{
  ChangePasswordUseCase, LoginUserUseCase, RegisterUserUseCase, UpdateProfileUseCase,
};

use super::handlers::admin::{
  delete_user_handler, get_user_handler, list_users_handler, update_user_handler,
};
use super::handlers::auth::{login_handler, register_handler};
use super::handlers::users::{
  change_password_handler, current_user_handler, update_profile_handler,
};

/// Configure public authentication routes
///
/// Mounts the endpoints that need no bearer token. All routes are prefixed
/// with the scope path (e.g., /api/auth).
///
/// # Routes
///
/// - POST /register - Register a new account
/// - POST /login - Verify credentials and issue a bearer token
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userhub::application::auth::{LoginUserUseCase, RegisterUserUseCase};
/// # use userhub::adapters::http::routes::configure_auth_routes;
///
/// # async fn example(
/// #   register_use_case: Arc<RegisterUserUseCase>,
/// #   login_use_case: Arc<LoginUserUseCase>,
/// # ) {
/// let app = App::new().service(
///   web::scope("/api/auth")
///     .configure(|cfg| configure_auth_routes(cfg, register_use_case, login_use_case)),
/// );
/// # }
/// ```
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    // Configure routes
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler));
}

/// Configure self-service account routes
///
/// The surrounding scope must be wrapped with `AuthMiddleware`; every
/// handler here reads the authenticated account from request extensions.
///
/// # Routes
///
/// - GET /me - Read the caller's own profile
/// - PUT /me - Update the caller's own profile
/// - POST /change-password - Change the caller's own password
pub fn configure_user_routes(
  cfg: &mut web::ServiceConfig,
  update_profile_use_case: Arc<UpdateProfileUseCase>,
  change_password_use_case: Arc<ChangePasswordUseCase>,
) {
  cfg
    .app_data(web::Data::new(update_profile_use_case))
    .app_data(web::Data::new(change_password_use_case))
    .route("/me", web::get().to(current_user_handler))
    .route("/me", web::put().to(update_profile_handler))
    .route("/change-password", web::post().to(change_password_handler));
}

/// Configure administrative account routes
///
/// The surrounding scope must be wrapped with `AuthMiddleware` and
/// `AdminGuard`.
///
/// # Routes
///
/// - GET / - List accounts page by page
/// - GET /{user_id} - Read one account
/// - PUT /{user_id} - Edit one account
/// - DELETE /{user_id} - Delete one account
pub fn configure_admin_routes(
  cfg: &mut web::ServiceConfig,
  list_users_use_case: Arc<ListUsersUseCase>,
  get_user_use_case: Arc<GetUserUseCase>,
  update_user_use_case: Arc<UpdateUserUseCase>,
  delete_user_use_case: Arc<DeleteUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_users_use_case))
    .app_data(web::Data::new(get_user_use_case))
    .app_data(web::Data::new(update_user_use_case))
    .app_data(web::Data::new(delete_user_use_case))
    .route("", web::get().to(list_users_handler))
    .route("/{user_id}", web::get().to(get_user_handler))
    .route("/{user_id}", web::put().to(update_user_handler))
    .route("/{user_id}", web::delete().to(delete_user_handler));
}
