use std::sync::Arc;

use crate::domain::auth::entities::{Account, AccountRole, AccountStatus};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Command for administratively editing an account
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
  /// Id of the account being edited
  pub user_id: i64,
  /// New email address, if changing
  pub email: Option<String>,
  /// New display name, if changing
  pub full_name: Option<String>,
  /// New role ("admin" or "user"), if changing
  pub role: Option<String>,
  /// New status ("active" or "inactive"), if changing
  pub status: Option<String>,
}

/// Use case for administrative account edits.
///
/// This is the only path through which role and status can change.
pub struct UpdateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateUserUseCase {
  /// Creates a new instance of UpdateUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the edit
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` when the id does not exist and
  /// `AuthError::EmailTaken` when the new email belongs to another account.
  pub async fn execute(&self, command: UpdateUserCommand) -> Result<Account, AuthError> {
    let email = command
      .email
      .filter(|s| !s.trim().is_empty())
      .map(Email::new)
      .transpose()?;

    let full_name = command.full_name.filter(|s| !s.trim().is_empty());

    let role = command
      .role
      .as_deref()
      .map(AccountRole::parse)
      .transpose()?;

    let status = command
      .status
      .as_deref()
      .map(AccountStatus::parse)
      .transpose()?;

    self
      .auth_service
      .update_account(command.user_id, email, full_name, role, status)
      .await
  }
}
