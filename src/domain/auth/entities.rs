use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, ValidationError};

/// Account entity representing a registered user of the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  /// Unique identifier, assigned by the directory on insert
  pub id: i64,
  /// Account email address (unique, lowercase)
  pub email: String,
  /// Password hash in PHC string format, never serialized outward
  pub password_hash: String,
  /// Display name
  pub full_name: String,
  /// Access role
  pub role: AccountRole,
  /// Account status
  pub status: AccountStatus,
  /// Timestamp when the account was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the account was last updated
  pub updated_at: DateTime<Utc>,
  /// Timestamp of the last successful login, if any
  pub last_login: Option<DateTime<Utc>>,
}

impl Account {
  /// Creates a new account with default role and status.
  ///
  /// The `id` is a placeholder until the directory assigns the real one
  /// on insert.
  pub fn new(email: String, password_hash: String, full_name: String) -> Self {
    let now = Utc::now();
    Self {
      id: 0,
      email,
      password_hash,
      full_name,
      role: AccountRole::User,
      status: AccountStatus::Active,
      created_at: now,
      updated_at: now,
      last_login: None,
    }
  }

  /// Reconstructs an account from database fields
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: i64,
    email: String,
    password_hash: String,
    full_name: String,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
  ) -> Result<Self, AuthError> {
    Ok(Self {
      id,
      email,
      password_hash,
      full_name,
      role: AccountRole::parse(&role)?,
      status: AccountStatus::parse(&status)?,
      created_at,
      updated_at,
      last_login,
    })
  }

  /// Updates the account's email
  pub fn update_email(&mut self, new_email: String) {
    self.email = new_email;
    self.updated_at = Utc::now();
  }

  /// Updates the account's full name
  pub fn update_full_name(&mut self, new_full_name: String) {
    self.full_name = new_full_name;
    self.updated_at = Utc::now();
  }

  /// Updates the account's password hash
  pub fn update_password(&mut self, new_password_hash: String) {
    self.password_hash = new_password_hash;
    self.updated_at = Utc::now();
  }

  /// Changes the account's role
  pub fn set_role(&mut self, role: AccountRole) {
    self.role = role;
    self.updated_at = Utc::now();
  }

  /// Changes the account's status
  pub fn set_status(&mut self, status: AccountStatus) {
    self.status = status;
    self.updated_at = Utc::now();
  }

  /// Records a successful login
  pub fn record_login(&mut self) {
    let now = Utc::now();
    self.last_login = Some(now);
    self.updated_at = now;
  }

  pub fn is_admin(&self) -> bool {
    matches!(self.role, AccountRole::Admin)
  }

  pub fn is_active(&self) -> bool {
    matches!(self.status, AccountStatus::Active)
  }
}

/// Account role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
  Admin,
  User,
}

impl AccountRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      AccountRole::Admin => "admin",
      AccountRole::User => "user",
    }
  }

  pub fn parse(s: &str) -> Result<Self, AuthError> {
    match s.to_lowercase().as_str() {
      "admin" => Ok(AccountRole::Admin),
      "user" => Ok(AccountRole::User),
      _ => Err(AuthError::Validation(ValidationError::InvalidRole)),
    }
  }
}

/// Account status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
  Active,
  Inactive,
}

impl AccountStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      AccountStatus::Active => "active",
      AccountStatus::Inactive => "inactive",
    }
  }

  pub fn parse(s: &str) -> Result<Self, AuthError> {
    match s.to_lowercase().as_str() {
      "active" => Ok(AccountStatus::Active),
      "inactive" => Ok(AccountStatus::Inactive),
      _ => Err(AuthError::Validation(ValidationError::InvalidStatus)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_account_creation_defaults() {
    let account = Account::new(
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "Test User".to_string(),
    );

    assert_eq!(account.email, "test@example.com");
    assert_eq!(account.full_name, "Test User");
    assert_eq!(account.role, AccountRole::User);
    assert_eq!(account.status, AccountStatus::Active);
    assert!(account.last_login.is_none());
  }

  #[test]
  fn test_record_login_sets_last_login() {
    let mut account = Account::new(
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "Test User".to_string(),
    );
    let before = account.updated_at;

    account.record_login();

    assert!(account.last_login.is_some());
    assert!(account.updated_at >= before);
  }

  #[test]
  fn test_update_password_refreshes_updated_at() {
    let mut account = Account::new(
      "test@example.com".to_string(),
      "old_hash".to_string(),
      "Test User".to_string(),
    );
    let before = account.updated_at;

    account.update_password("new_hash".to_string());

    assert_eq!(account.password_hash, "new_hash");
    assert!(account.updated_at >= before);
  }

  #[test]
  fn test_role_string_mapping() {
    assert_eq!(AccountRole::Admin.as_str(), "admin");
    assert_eq!(AccountRole::parse("user").unwrap(), AccountRole::User);
    assert_eq!(AccountRole::parse("ADMIN").unwrap(), AccountRole::Admin);
    assert!(AccountRole::parse("superuser").is_err());
  }

  #[test]
  fn test_status_string_mapping() {
    assert_eq!(AccountStatus::Inactive.as_str(), "inactive");
    assert_eq!(
      AccountStatus::parse("active").unwrap(),
      AccountStatus::Active
    );
    assert!(AccountStatus::parse("banned").is_err());
  }

  #[test]
  fn test_role_helpers() {
    let mut account = Account::new(
      "admin@example.com".to_string(),
      "hash".to_string(),
      "Admin".to_string(),
    );
    assert!(!account.is_admin());
    assert!(account.is_active());

    account.set_role(AccountRole::Admin);
    account.set_status(AccountStatus::Inactive);
    assert!(account.is_admin());
    assert!(!account.is_active());
  }
}
