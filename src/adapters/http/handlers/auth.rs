use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
  errors::ApiError,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for account registration
///
/// POST /api/auth/register
/// Body: RegisterRequest (JSON)
/// Response: UserResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = RegisterUserCommand {
    email: request.email.clone(),
    full_name: request.full_name.clone(),
    password: request.password.clone(),
    confirm_password: request.confirm_password.clone(),
  };

  // Execute use case
  let account = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(UserResponse::from(account)))
}

/// Handler for login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: TokenResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // No shape validation here: the use case folds anything unstorable into
  // the invalid-credentials failure
  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  // Execute use case
  let response = use_case.execute(command).await?;

  // Map to API response
  let api_response = TokenResponse {
    access_token: response.access_token,
    token_type: response.token_type,
    expires_in: response.expires_in,
  };

  Ok(HttpResponse::Ok().json(api_response))
}
