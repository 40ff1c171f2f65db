use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for permanently deleting an account.
///
/// Deletion frees the email for re-registration and cuts off any still
/// outstanding tokens, since authentication re-resolves the account on
/// every request.
pub struct DeleteUserUseCase {
  auth_service: Arc<AuthService>,
}

impl DeleteUserUseCase {
  /// Creates a new instance of DeleteUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the deletion
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` when no account has this id.
  pub async fn execute(&self, user_id: i64) -> Result<(), AuthError> {
    self.auth_service.delete_account(user_id).await
  }
}
