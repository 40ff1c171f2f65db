use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in with email and password
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// Account email address
  pub email: String,
  /// Account password (plain text)
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Signed bearer token
  pub access_token: String,
  /// Token scheme, always "bearer"
  pub token_type: String,
  /// Token validity window in minutes
  pub expires_in: i64,
}

/// Use case for credential verification and token issuance
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case
  ///
  /// # Arguments
  /// * `command` - The login command containing the credentials
  ///
  /// # Returns
  /// A `LoginUserResponse` carrying the bearer token and its validity
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for unknown emails and wrong
  /// passwords alike, and `AuthError::AccountInactive` for deactivated
  /// accounts presenting correct credentials.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    // Credentials that could never belong to a stored account are reported
    // exactly like a wrong password
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (_account, token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      access_token: token,
      token_type: "bearer".to_string(),
      expires_in: self.auth_service.token_ttl_minutes(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::{RegisterUserCommand, RegisterUserUseCase};
  use crate::domain::auth::test_support::{FakeHasher, FakeTokenService, InMemoryAccountRepository};

  async fn setup_with_account() -> LoginUserUseCase {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let service = Arc::new(AuthService::new(
      repo,
      Arc::new(FakeHasher),
      Arc::new(FakeTokenService),
      1440,
    ));
    RegisterUserUseCase::new(service.clone())
      .execute(RegisterUserCommand {
        email: "a@x.com".to_string(),
        full_name: "A".to_string(),
        password: "password123".to_string(),
        confirm_password: "password123".to_string(),
      })
      .await
      .unwrap();
    LoginUserUseCase::new(service)
  }

  #[tokio::test]
  async fn test_login_returns_bearer_token_with_ttl() {
    let use_case = setup_with_account().await;

    let response = use_case
      .execute(LoginUserCommand {
        email: "a@x.com".to_string(),
        password: "password123".to_string(),
      })
      .await
      .unwrap();

    assert!(!response.access_token.is_empty());
    assert_eq!(response.token_type, "bearer");
    assert_eq!(response.expires_in, 1440);
  }

  #[tokio::test]
  async fn test_login_with_wrong_password_fails() {
    let use_case = setup_with_account().await;

    let result = use_case
      .execute(LoginUserCommand {
        email: "a@x.com".to_string(),
        password: "wrongpassword".to_string(),
      })
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_unstorable_credentials_read_as_invalid_credentials() {
    let use_case = setup_with_account().await;

    // Too short to ever have been registered
    let short_password = use_case
      .execute(LoginUserCommand {
        email: "a@x.com".to_string(),
        password: "tiny".to_string(),
      })
      .await;
    assert!(matches!(short_password, Err(AuthError::InvalidCredentials)));

    // Not an email, so no account can own it
    let bad_email = use_case
      .execute(LoginUserCommand {
        email: "not-an-email".to_string(),
        password: "password123".to_string(),
      })
      .await;
    assert!(matches!(bad_email, Err(AuthError::InvalidCredentials)));
  }
}
