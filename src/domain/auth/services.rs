use chrono::Duration;
use std::sync::Arc;

use super::entities::{Account, AccountRole, AccountStatus};
use super::errors::{AuthError, RepositoryError};
use super::ports::{AccountRepository, PasswordHasher, TokenService};
use super::value_objects::{Email, Password};

/// Authentication and account-management service implementing the core
/// business logic
pub struct AuthService {
  accounts: Arc<dyn AccountRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
  token_ttl_minutes: i64,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    accounts: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
    token_ttl_minutes: i64,
  ) -> Self {
    Self {
      accounts,
      password_hasher,
      token_service,
      token_ttl_minutes,
    }
  }

  /// Validity window applied to issued tokens, in minutes
  pub fn token_ttl_minutes(&self) -> i64 {
    self.token_ttl_minutes
  }

  /// Registers a new account with email and password
  ///
  /// # Arguments
  /// * `email` - The account's email address
  /// * `password` - The account's password (will be hashed)
  /// * `full_name` - The account's full name
  ///
  /// # Returns
  /// The created account with its assigned id
  ///
  /// # Errors
  /// Returns `AuthError::EmailTaken` if the email is already registered.
  /// The directory's unique constraint backs the pre-check, so a concurrent
  /// insert between check and write still surfaces as `EmailTaken`.
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    full_name: String,
  ) -> Result<Account, AuthError> {
    if self.accounts.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailTaken);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let account = Account::new(email.into_inner(), password_hash, full_name);

    match self.accounts.create(account).await {
      Ok(created) => Ok(created),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => Err(AuthError::EmailTaken),
      Err(e) => Err(e),
    }
  }

  /// Verifies credentials and issues a bearer token
  ///
  /// # Arguments
  /// * `email` - The account's email address
  /// * `password` - The account's password
  ///
  /// # Returns
  /// The account (with `last_login` freshly set) and the issued token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for unknown emails and wrong
  /// passwords alike, and `AuthError::AccountInactive` when the credentials
  /// are correct but the account has been deactivated.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(Account, String), AuthError> {
    let mut account = match self.accounts.find_by_email(&email).await? {
      Some(account) => account,
      None => {
        // Unknown emails still pay for one key derivation so this path
        // costs the same as a wrong-password attempt
        let _ = self.password_hasher.hash(&password).await;
        return Err(AuthError::InvalidCredentials);
      }
    };

    let is_valid = self
      .password_hasher
      .verify(&password, &account.password_hash)
      .await?;

    if !is_valid {
      return Err(AuthError::InvalidCredentials);
    }

    // Checked only after the password, so deactivation is not observable
    // without valid credentials
    if !account.is_active() {
      return Err(AuthError::AccountInactive);
    }

    account.record_login();
    let account = self.accounts.update(account).await?;

    let token = self
      .token_service
      .issue(&account.email, Duration::minutes(self.token_ttl_minutes))?;

    Ok((account, token))
  }

  /// Applies self-service profile changes for the given account.
  ///
  /// Fields left as `None` keep their current values. A changed email must
  /// not belong to any other account.
  pub async fn update_profile(
    &self,
    mut account: Account,
    new_email: Option<Email>,
    new_full_name: Option<String>,
  ) -> Result<Account, AuthError> {
    if let Some(email) = new_email {
      if email.as_str() != account.email {
        self.ensure_email_free(&email, account.id).await?;
        account.update_email(email.into_inner());
      }
    }

    if let Some(full_name) = new_full_name {
      account.update_full_name(full_name);
    }

    self.persist_update(account).await
  }

  /// Replaces the account's password after verifying the current one
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCurrentPassword` when the presented current
  /// password does not verify against the stored hash.
  pub async fn change_password(
    &self,
    mut account: Account,
    current_password: Password,
    new_password: Password,
  ) -> Result<Account, AuthError> {
    let is_valid = self
      .password_hasher
      .verify(&current_password, &account.password_hash)
      .await?;

    if !is_valid {
      return Err(AuthError::InvalidCurrentPassword);
    }

    let new_hash = self.password_hasher.hash(&new_password).await?;
    account.update_password(new_hash);

    self.accounts.update(account).await
  }

  /// Returns one page of accounts plus the total count.
  ///
  /// Pages are 1-based; ordering is by id ascending.
  pub async fn list_accounts(
    &self,
    page: i64,
    limit: i64,
  ) -> Result<(Vec<Account>, i64), AuthError> {
    let offset = (page - 1) * limit;
    let total = self.accounts.count().await?;
    let accounts = self.accounts.list(offset, limit).await?;
    Ok((accounts, total))
  }

  /// Looks up a single account by id
  pub async fn get_account(&self, id: i64) -> Result<Account, AuthError> {
    self
      .accounts
      .find_by_id(id)
      .await?
      .ok_or(AuthError::NotFound)
  }

  /// Applies administrative changes to an account.
  ///
  /// Role and status changes are only reachable through this path.
  pub async fn update_account(
    &self,
    id: i64,
    new_email: Option<Email>,
    new_full_name: Option<String>,
    new_role: Option<AccountRole>,
    new_status: Option<AccountStatus>,
  ) -> Result<Account, AuthError> {
    let mut account = self.get_account(id).await?;

    if let Some(email) = new_email {
      if email.as_str() != account.email {
        self.ensure_email_free(&email, account.id).await?;
        account.update_email(email.into_inner());
      }
    }

    if let Some(full_name) = new_full_name {
      account.update_full_name(full_name);
    }

    if let Some(role) = new_role {
      account.set_role(role);
    }

    if let Some(status) = new_status {
      account.set_status(status);
    }

    self.persist_update(account).await
  }

  /// Permanently deletes an account
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` when the id does not exist.
  pub async fn delete_account(&self, id: i64) -> Result<(), AuthError> {
    self.accounts.delete(id).await
  }

  async fn ensure_email_free(&self, email: &Email, account_id: i64) -> Result<(), AuthError> {
    if let Some(existing) = self.accounts.find_by_email(email).await? {
      if existing.id != account_id {
        return Err(AuthError::EmailTaken);
      }
    }
    Ok(())
  }

  async fn persist_update(&self, account: Account) -> Result<Account, AuthError> {
    match self.accounts.update(account).await {
      Ok(updated) => Ok(updated),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => Err(AuthError::EmailTaken),
      Err(e) => Err(e),
    }
  }
}

/// Token-to-principal resolution and role enforcement.
///
/// Every protected route passes through `authenticate`; admin routes
/// additionally go through `require_role`.
pub struct AccessControl {
  accounts: Arc<dyn AccountRepository>,
  token_service: Arc<dyn TokenService>,
}

impl AccessControl {
  /// Creates a new instance of AccessControl
  pub fn new(accounts: Arc<dyn AccountRepository>, token_service: Arc<dyn TokenService>) -> Self {
    Self {
      accounts,
      token_service,
    }
  }

  /// Resolves a bearer token to the live account it identifies.
  ///
  /// The account is loaded fresh from the directory on every call: a
  /// deleted account stops authenticating as soon as its record is gone,
  /// and role or status changes are visible on the very next request.
  /// Status itself is not enforced here; only login refuses inactive
  /// accounts.
  ///
  /// # Errors
  /// Returns `AuthError::Unauthorized` for any invalid, expired or tampered
  /// token, and for subjects that no longer resolve to an account.
  pub async fn authenticate(&self, token: &str) -> Result<Account, AuthError> {
    let subject = self
      .token_service
      .validate(token)
      .map_err(|_| AuthError::Unauthorized)?;

    let email = Email::new(subject).map_err(|_| AuthError::Unauthorized)?;

    self
      .accounts
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::Unauthorized)
  }

  /// Fails with `AuthError::Forbidden` unless the account holds the
  /// required role
  pub fn require_role(&self, account: &Account, role: AccountRole) -> Result<(), AuthError> {
    if account.role != role {
      return Err(AuthError::Forbidden);
    }
    Ok(())
  }
}
