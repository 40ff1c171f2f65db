use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AdminUpdateUserRequest, ListUsersQuery, SuccessResponse, UserListResponse, UserResponse},
  errors::ApiError,
};
use crate::application::admin::{
  DeleteUserUseCase, GetUserUseCase, ListUsersCommand, ListUsersUseCase, UpdateUserCommand,
  UpdateUserUseCase,
};

/// Handler for the administrative account listing
///
/// GET /api/admin/users?page=1&limit=10
/// Headers: Authorization: Bearer <admin token>
/// Response: UserListResponse (JSON) with status 200
pub async fn list_users_handler(
  query: web::Query<ListUsersQuery>,
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate query parameters
  query.validate()?;

  // Create command from query
  let command = ListUsersCommand {
    page: query.page,
    limit: query.limit,
  };

  // Execute use case
  let response = use_case.execute(command).await?;

  // Map to API response
  let api_response = UserListResponse {
    total: response.total,
    page: response.page,
    limit: response.limit,
    users: response.users.into_iter().map(UserResponse::from).collect(),
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for reading a single account
///
/// GET /api/admin/users/{user_id}
/// Headers: Authorization: Bearer <admin token>
/// Response: UserResponse (JSON) with status 200
pub async fn get_user_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user_id = path.into_inner();

  let account = use_case.execute(user_id).await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

/// Handler for administratively editing an account
///
/// PUT /api/admin/users/{user_id}
/// Headers: Authorization: Bearer <admin token>
/// Body: AdminUpdateUserRequest (JSON)
/// Response: UserResponse (JSON) with status 200
pub async fn update_user_handler(
  path: web::Path<i64>,
  request: web::Json<AdminUpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = UpdateUserCommand {
    user_id: path.into_inner(),
    email: request.email.clone(),
    full_name: request.full_name.clone(),
    role: request.role.clone(),
    status: request.status.clone(),
  };

  // Execute use case
  let account = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

/// Handler for deleting an account
///
/// DELETE /api/admin/users/{user_id}
/// Headers: Authorization: Bearer <admin token>
/// Response: SuccessResponse (JSON) with status 200
pub async fn delete_user_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user_id = path.into_inner();

  use_case.execute(user_id).await?;

  let response = SuccessResponse {
    message: "User deleted successfully".to_string(),
  };

  Ok(HttpResponse::Ok().json(response))
}
