use thiserror::Error;

/// Main authentication and account-management error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Passwords do not match")]
  PasswordMismatch,

  #[error("Email already registered")]
  EmailTaken,

  #[error("Incorrect email or password")]
  InvalidCredentials,

  #[error("Invalid current password")]
  InvalidCurrentPassword,

  #[error("Account is inactive")]
  AccountInactive,

  #[error("Authentication required")]
  Unauthorized,

  #[error("Admin privileges required")]
  Forbidden,

  #[error("User not found")]
  NotFound,

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

/// Bearer token errors
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Token has expired")]
  Expired,

  #[error("Malformed token")]
  Malformed,

  #[error("Invalid token signature")]
  BadSignature,

  #[error("Signing secret must be at least {min} bytes")]
  WeakSecret { min: usize },

  #[error("Token encoding failed: {0}")]
  EncodingFailed(String),
}

/// Input validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Password too short, minimum {min} characters required")]
  PasswordTooShort { min: usize },

  #[error("Password too long, maximum {max} characters allowed")]
  PasswordTooLong { max: usize },

  #[error("Invalid role value")]
  InvalidRole,

  #[error("Invalid status value")]
  InvalidStatus,

  #[error("Invalid field: {field}")]
  InvalidField { field: String },
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;
    match error.kind() {
      ErrorKind::ExpiredSignature => TokenError::Expired,
      ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
      _ => TokenError::Malformed,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_row_not_found_maps_to_not_found() {
    let err = RepositoryError::from(sqlx::Error::RowNotFound);
    assert!(matches!(err, RepositoryError::NotFound));
  }

  #[test]
  fn test_validation_error_converts_to_auth_error() {
    let err = AuthError::from(ValidationError::InvalidEmail);
    assert!(matches!(
      err,
      AuthError::Validation(ValidationError::InvalidEmail)
    ));
  }

  #[test]
  fn test_jwt_expired_maps_to_expired() {
    let err = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
    assert!(matches!(TokenError::from(err), TokenError::Expired));
  }

  #[test]
  fn test_jwt_invalid_signature_maps_to_bad_signature() {
    let err = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSignature);
    assert!(matches!(TokenError::from(err), TokenError::BadSignature));
  }
}
