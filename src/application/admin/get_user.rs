use std::sync::Arc;

use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for fetching a single account by id
pub struct GetUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetUserUseCase {
  /// Creates a new instance of GetUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the lookup
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` when no account has this id.
  pub async fn execute(&self, user_id: i64) -> Result<Account, AuthError> {
    self.auth_service.get_account(user_id).await
  }
}
