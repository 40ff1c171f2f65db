use std::sync::Arc;

use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Command for updating the caller's own profile
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
  /// The authenticated account being updated
  pub principal: Account,
  /// New email address, if changing
  pub email: Option<String>,
  /// New display name, if changing
  pub full_name: Option<String>,
}

/// Use case for self-service profile updates
pub struct UpdateProfileUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateProfileUseCase {
  /// Creates a new instance of UpdateProfileUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the profile update use case.
  ///
  /// Absent or blank fields keep their current values. Changing the email
  /// invalidates tokens issued before the change, since tokens name the
  /// account by email; the caller must log in again.
  ///
  /// # Errors
  /// Returns `AuthError::EmailTaken` when the new email already belongs to
  /// another account.
  pub async fn execute(&self, command: UpdateProfileCommand) -> Result<Account, AuthError> {
    let email = command
      .email
      .filter(|s| !s.trim().is_empty())
      .map(Email::new)
      .transpose()?;

    let full_name = command.full_name.filter(|s| !s.trim().is_empty());

    self
      .auth_service
      .update_profile(command.principal, email, full_name)
      .await
  }
}
