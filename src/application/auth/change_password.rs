use std::sync::Arc;

use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Password;

/// Command for changing the caller's own password
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
  /// The authenticated account whose password changes
  pub principal: Account,
  /// Current password, verified before anything changes
  pub current_password: String,
  /// Replacement password
  pub new_password: String,
  /// Replacement password repeated for confirmation
  pub confirm_password: String,
}

/// Use case for self-service password changes
pub struct ChangePasswordUseCase {
  auth_service: Arc<AuthService>,
}

impl ChangePasswordUseCase {
  /// Creates a new instance of ChangePasswordUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the password change use case
  ///
  /// # Errors
  /// Returns `AuthError::PasswordMismatch` when the confirmation does not
  /// match, and `AuthError::InvalidCurrentPassword` when the current
  /// password does not verify.
  pub async fn execute(&self, command: ChangePasswordCommand) -> Result<(), AuthError> {
    if command.new_password != command.confirm_password {
      return Err(AuthError::PasswordMismatch);
    }

    // A current password the length rules would have refused at registration
    // cannot match the stored hash, so it is simply wrong
    let current_password =
      Password::new(command.current_password).map_err(|_| AuthError::InvalidCurrentPassword)?;
    let new_password = Password::new(command.new_password)?;

    self
      .auth_service
      .change_password(command.principal, current_password, new_password)
      .await?;

    Ok(())
  }
}
