use std::sync::Arc;

use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for listing accounts page by page
#[derive(Debug, Clone)]
pub struct ListUsersCommand {
  /// 1-based page number
  pub page: i64,
  /// Page size
  pub limit: i64,
}

/// One page of accounts plus the directory-wide total
#[derive(Debug, Clone)]
pub struct ListUsersResponse {
  pub total: i64,
  pub page: i64,
  pub limit: i64,
  pub users: Vec<Account>,
}

/// Use case for administrative account listing
pub struct ListUsersUseCase {
  auth_service: Arc<AuthService>,
}

impl ListUsersUseCase {
  /// Creates a new instance of ListUsersUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the listing use case.
  ///
  /// Accounts are returned in id-ascending order; a page past the end of
  /// the directory comes back empty with the total unchanged.
  pub async fn execute(&self, command: ListUsersCommand) -> Result<ListUsersResponse, AuthError> {
    let (users, total) = self
      .auth_service
      .list_accounts(command.page, command.limit)
      .await?;

    Ok(ListUsersResponse {
      total,
      page: command.page,
      limit: command.limit,
      users,
    })
  }
}
