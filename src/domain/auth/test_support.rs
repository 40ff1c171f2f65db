//! In-memory fakes for exercising domain and application logic in tests.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Mutex;

use super::entities::Account;
use super::errors::{AuthError, RepositoryError, TokenError};
use super::ports::{AccountRepository, PasswordHasher, TokenService};
use super::value_objects::{Email, Password};

/// Account store backed by a `Vec`, enforcing the same email uniqueness
/// rule as the real database.
pub struct InMemoryAccountRepository {
  accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
  pub fn new() -> Self {
    Self {
      accounts: Mutex::new(Vec::new()),
    }
  }
}

impl Default for InMemoryAccountRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
  async fn create(&self, mut account: Account) -> Result<Account, AuthError> {
    let mut accounts = self.accounts.lock().unwrap();
    if accounts.iter().any(|a| a.email == account.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "accounts_email_key".to_string(),
      )));
    }
    account.id = accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    accounts.push(account.clone());
    Ok(account)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AuthError> {
    Ok(
      self
        .accounts
        .lock()
        .unwrap()
        .iter()
        .find(|a| a.id == id)
        .cloned(),
    )
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError> {
    Ok(
      self
        .accounts
        .lock()
        .unwrap()
        .iter()
        .find(|a| a.email == email.as_str())
        .cloned(),
    )
  }

  async fn update(&self, account: Account) -> Result<Account, AuthError> {
    let mut accounts = self.accounts.lock().unwrap();
    if accounts
      .iter()
      .any(|a| a.email == account.email && a.id != account.id)
    {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "accounts_email_key".to_string(),
      )));
    }
    let slot = accounts
      .iter_mut()
      .find(|a| a.id == account.id)
      .ok_or(AuthError::NotFound)?;
    *slot = account.clone();
    Ok(account)
  }

  async fn delete(&self, id: i64) -> Result<(), AuthError> {
    let mut accounts = self.accounts.lock().unwrap();
    let before = accounts.len();
    accounts.retain(|a| a.id != id);
    if accounts.len() == before {
      return Err(AuthError::NotFound);
    }
    Ok(())
  }

  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, AuthError> {
    let mut accounts = self.accounts.lock().unwrap().clone();
    accounts.sort_by_key(|a| a.id);
    Ok(
      accounts
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect(),
    )
  }

  async fn count(&self) -> Result<i64, AuthError> {
    Ok(self.accounts.lock().unwrap().len() as i64)
  }
}

/// Deterministic stand-in for the real hasher, cheap enough for tight loops
pub struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
  async fn hash(&self, password: &Password) -> Result<String, AuthError> {
    Ok(format!("hashed:{}", password.as_str()))
  }

  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError> {
    Ok(password_hash == format!("hashed:{}", password.as_str()))
  }
}

/// Transparent token scheme so tests can assert on subjects directly
pub struct FakeTokenService;

impl TokenService for FakeTokenService {
  fn issue(&self, subject: &str, _ttl: Duration) -> Result<String, TokenError> {
    Ok(format!("token:{}", subject))
  }

  fn validate(&self, token: &str) -> Result<String, TokenError> {
    token
      .strip_prefix("token:")
      .map(str::to_string)
      .ok_or(TokenError::BadSignature)
  }
}
