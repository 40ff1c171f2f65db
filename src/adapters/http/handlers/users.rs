use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ChangePasswordRequest, SuccessResponse, UpdateProfileRequest, UserResponse},
  errors::ApiError,
  middleware::AuthAccount,
};
use crate::application::auth::{
  ChangePasswordCommand, ChangePasswordUseCase, UpdateProfileCommand, UpdateProfileUseCase,
};

/// Handler for reading the caller's own profile
///
/// GET /api/users/me
/// Headers: Authorization: Bearer <token>
/// Response: UserResponse (JSON) with status 200
pub async fn current_user_handler(http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
  let account = http_req.authenticated_account();

  Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

/// Handler for updating the caller's own profile
///
/// PUT /api/users/me
/// Headers: Authorization: Bearer <token>
/// Body: UpdateProfileRequest (JSON)
/// Response: UserResponse (JSON) with status 200
pub async fn update_profile_handler(
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = UpdateProfileCommand {
    principal: http_req.authenticated_account(),
    email: request.email.clone(),
    full_name: request.full_name.clone(),
  };

  // Execute use case
  let account = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

/// Handler for changing the caller's own password
///
/// POST /api/users/change-password
/// Headers: Authorization: Bearer <token>
/// Body: ChangePasswordRequest (JSON)
/// Response: SuccessResponse (JSON) with status 200
pub async fn change_password_handler(
  request: web::Json<ChangePasswordRequest>,
  use_case: web::Data<Arc<ChangePasswordUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = ChangePasswordCommand {
    principal: http_req.authenticated_account(),
    current_password: request.current_password.clone(),
    new_password: request.new_password.clone(),
    confirm_password: request.confirm_password.clone(),
  };

  // Execute use case
  use_case.execute(command).await?;

  let response = SuccessResponse {
    message: "Password updated successfully".to_string(),
  };

  Ok(HttpResponse::Ok().json(response))
}
