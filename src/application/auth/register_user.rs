use std::sync::Arc;

use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// Account email address
  pub email: String,
  /// Display name
  pub full_name: String,
  /// Password (plain text, will be hashed)
  pub password: String,
  /// Password repeated for confirmation
  pub confirm_password: String,
}

/// Use case for registering a new account
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the registration use case
  ///
  /// # Arguments
  /// * `command` - The registration command containing the account details
  ///
  /// # Returns
  /// The created account with role `user` and status `active`
  ///
  /// # Errors
  /// Returns `AuthError::PasswordMismatch` when the confirmation does not
  /// match, and `AuthError::EmailTaken` when the email is already registered.
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<Account, AuthError> {
    if command.password != command.confirm_password {
      return Err(AuthError::PasswordMismatch);
    }

    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    self
      .auth_service
      .register(email, password, command.full_name)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::AccountRole;
  use crate::domain::auth::test_support::{FakeHasher, FakeTokenService, InMemoryAccountRepository};

  fn use_case() -> RegisterUserUseCase {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let service = Arc::new(AuthService::new(
      repo,
      Arc::new(FakeHasher),
      Arc::new(FakeTokenService),
      1440,
    ));
    RegisterUserUseCase::new(service)
  }

  fn command(email: &str, password: &str, confirm: &str) -> RegisterUserCommand {
    RegisterUserCommand {
      email: email.to_string(),
      full_name: "Test User".to_string(),
      password: password.to_string(),
      confirm_password: confirm.to_string(),
    }
  }

  #[tokio::test]
  async fn test_mismatched_confirmation_is_rejected() {
    let use_case = use_case();

    let result = use_case
      .execute(command("a@x.com", "password123", "password456"))
      .await;

    assert!(matches!(result, Err(AuthError::PasswordMismatch)));
  }

  #[tokio::test]
  async fn test_invalid_email_is_rejected() {
    let use_case = use_case();

    let result = use_case
      .execute(command("not-an-email", "password123", "password123"))
      .await;

    assert!(matches!(result, Err(AuthError::Validation(_))));
  }

  #[tokio::test]
  async fn test_successful_registration_returns_account() {
    let use_case = use_case();

    let account = use_case
      .execute(command("a@x.com", "password123", "password123"))
      .await
      .unwrap();

    assert!(account.id > 0);
    assert_eq!(account.role, AccountRole::User);
  }

  #[tokio::test]
  async fn test_duplicate_email_is_rejected() {
    let use_case = use_case();
    use_case
      .execute(command("a@x.com", "password123", "password123"))
      .await
      .unwrap();

    let result = use_case
      .execute(command("a@x.com", "password456", "password456"))
      .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
  }
}
