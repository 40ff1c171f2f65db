use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;
use zeroize::Zeroize;

use super::errors::ValidationError;

// ============================================================================
// Email Value Object
// ============================================================================

/// Validated email address, normalized to lowercase.
///
/// Normalization happens at every boundary that constructs an `Email`, so
/// registration and lookup always agree on the stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValidationError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// Ensure the plaintext is wiped when dropped
impl Drop for Password {
  fn drop(&mut self) {
    self.0.zeroize();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("Test@Example.COM").unwrap();
    assert_eq!(email.as_str(), "test@example.com");
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("password123").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValidationError::PasswordTooShort { .. })
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValidationError::PasswordTooLong { .. })
    ));
  }

  #[test]
  fn test_password_is_masked_in_debug_output() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(format!("{}", password), "***");
  }
}
