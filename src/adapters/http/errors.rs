use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError, TokenError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Account and authentication errors (400, 401, 403 or 404)
  Auth(AuthErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Account and authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Password and confirmation differ (400)
  PasswordMismatch,

  /// Email already registered (400)
  EmailTaken,

  /// Current password check failed on password change (400)
  InvalidCurrentPassword,

  /// Wrong email or password on login (401)
  InvalidCredentials,

  /// Missing, malformed or expired bearer token (401)
  Unauthorized,

  /// Account exists but is deactivated (403)
  AccountInactive,

  /// Caller lacks the admin role (403)
  Forbidden,

  /// Target account does not exist (404)
  NotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?} ", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::PasswordMismatch => StatusCode::BAD_REQUEST,
        AuthErrorKind::EmailTaken => StatusCode::BAD_REQUEST,
        AuthErrorKind::InvalidCurrentPassword => StatusCode::BAD_REQUEST,
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        AuthErrorKind::AccountInactive => StatusCode::FORBIDDEN,
        AuthErrorKind::Forbidden => StatusCode::FORBIDDEN,
        AuthErrorKind::NotFound => StatusCode::NOT_FOUND,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::Auth(kind) => {
        let (err_type, msg) = match kind {
          AuthErrorKind::PasswordMismatch => {
            ("password_mismatch", "Passwords do not match".to_string())
          }
          AuthErrorKind::EmailTaken => ("email_taken", "Email already registered".to_string()),
          AuthErrorKind::InvalidCurrentPassword => (
            "invalid_current_password",
            "Current password is incorrect".to_string(),
          ),
          AuthErrorKind::InvalidCredentials => (
            "invalid_credentials",
            "Incorrect email or password".to_string(),
          ),
          AuthErrorKind::Unauthorized => (
            "unauthorized",
            "Invalid or missing authorization token".to_string(),
          ),
          AuthErrorKind::AccountInactive => {
            ("account_inactive", "Account is inactive".to_string())
          }
          AuthErrorKind::Forbidden => ("forbidden", "Admin privileges required".to_string()),
          AuthErrorKind::NotFound => ("not_found", "User not found".to_string()),
        };
        (err_type, msg, None)
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::PasswordMismatch => ApiError::Auth(AuthErrorKind::PasswordMismatch),
      AuthError::EmailTaken => ApiError::Auth(AuthErrorKind::EmailTaken),
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::InvalidCurrentPassword => ApiError::Auth(AuthErrorKind::InvalidCurrentPassword),
      AuthError::AccountInactive => ApiError::Auth(AuthErrorKind::AccountInactive),
      AuthError::Unauthorized => ApiError::Auth(AuthErrorKind::Unauthorized),
      AuthError::Forbidden => ApiError::Auth(AuthErrorKind::Forbidden),
      AuthError::NotFound => ApiError::Auth(AuthErrorKind::NotFound),
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::NotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailTaken),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Token(err) => match err {
        TokenError::Expired | TokenError::Malformed | TokenError::BadSignature => {
          ApiError::Auth(AuthErrorKind::Unauthorized)
        }
        _ => ApiError::Internal(err.to_string()),
      },
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::HashError;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::EmailTaken).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::AccountInactive).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::NotFound).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailTaken.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = AuthError::Forbidden.into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn test_duplicate_key_maps_to_email_taken() {
    let api_error: ApiError =
      AuthError::Repository(RepositoryError::DuplicateKey("accounts_email_key".into())).into();

    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
    assert!(matches!(api_error, ApiError::Auth(AuthErrorKind::EmailTaken)));
  }

  #[test]
  fn test_expired_token_maps_to_unauthorized() {
    let api_error: ApiError = AuthError::Token(TokenError::Expired).into();

    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn test_hash_error_stays_internal() {
    let api_error: ApiError = AuthError::Hash(HashError::HashingFailed("boom".into())).into();

    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
