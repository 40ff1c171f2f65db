use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::entities::{Account, AccountRole, AccountStatus};

fn default_page() -> i64 {
  1
}

fn default_limit() -> i64 {
  10
}

/// Request for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// Account email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// Display name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Full name must be between 1 and 255 characters"
  ))]
  pub full_name: String,

  /// Account password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  /// Must repeat `password` exactly
  pub confirm_password: String,
}

/// Request for login.
///
/// Deliberately unvalidated beyond field presence: any credential shape
/// that cannot match a stored account comes back as the same
/// invalid-credentials failure, revealing nothing about what exists.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
  /// Account email address
  pub email: String,

  /// Account password
  pub password: String,
}

/// Request for updating the caller's own profile.
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Full name must be between 1 and 255 characters"
  ))]
  pub full_name: Option<String>,
}

/// Request for changing the caller's own password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
  #[validate(length(min = 1, message = "Current password is required"))]
  pub current_password: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub new_password: String,

  /// Must repeat `new_password` exactly
  pub confirm_password: String,
}

/// Request for an administrative account edit.
/// Omitted fields are left unchanged; `role` and `status` are parsed
/// against the known values further down the stack.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Full name must be between 1 and 255 characters"
  ))]
  pub full_name: Option<String>,

  pub role: Option<String>,

  pub status: Option<String>,
}

/// Query parameters for the administrative account listing
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListUsersQuery {
  /// 1-based page number
  #[serde(default = "default_page")]
  #[validate(range(min = 1, message = "Page must be at least 1"))]
  pub page: i64,

  /// Page size
  #[serde(default = "default_limit")]
  #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
  pub limit: i64,
}

/// Public view of an account.
///
/// This is the only place an `Account` crosses the wire, and the
/// password hash stays behind.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
  pub id: i64,
  pub email: String,
  pub full_name: String,
  pub role: AccountRole,
  pub status: AccountStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub last_login: Option<DateTime<Utc>>,
}

impl From<Account> for UserResponse {
  fn from(account: Account) -> Self {
    Self {
      id: account.id,
      email: account.email,
      full_name: account.full_name,
      role: account.role,
      status: account.status,
      created_at: account.created_at,
      updated_at: account.updated_at,
      last_login: account.last_login,
    }
  }
}

/// Response after successful login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
  /// Signed bearer token
  pub access_token: String,

  /// Always "bearer"
  pub token_type: String,

  /// Token lifetime in minutes
  pub expires_in: i64,
}

/// One page of the administrative account listing
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
  pub total: i64,
  pub page: i64,
  pub limit: i64,
  pub users: Vec<UserResponse>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
