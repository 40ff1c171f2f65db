use async_trait::async_trait;
use chrono::Duration;

use super::entities::Account;
use super::errors::{AuthError, TokenError};
use super::value_objects::{Email, Password};

/// Repository trait for account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
  /// Inserts a new account and returns it with the assigned id
  async fn create(&self, account: Account) -> Result<Account, AuthError>;

  /// Finds an account by its unique identifier
  async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AuthError>;

  /// Finds an account by its email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError>;

  /// Updates an existing account
  async fn update(&self, account: Account) -> Result<Account, AuthError>;

  /// Permanently deletes an account, freeing its email for reuse.
  /// Fails with `AuthError::NotFound` when the id does not exist.
  async fn delete(&self, id: i64) -> Result<(), AuthError>;

  /// Returns one page of accounts ordered by id ascending
  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, AuthError>;

  /// Returns the total number of accounts
  async fn count(&self) -> Result<i64, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password into a self-contained hash string.
  /// Each call salts independently, so equal inputs produce distinct
  /// hash strings.
  async fn hash(&self, password: &Password) -> Result<String, AuthError>;

  /// Verifies a plain text password against a stored hash string.
  /// Returns `Ok(false)` for wrong passwords and for malformed hash
  /// strings rather than erroring.
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError>;
}

/// Service trait for issuing and validating signed bearer tokens
pub trait TokenService: Send + Sync {
  /// Issues a signed token carrying the subject, valid for `ttl` from now
  fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError>;

  /// Validates a token and returns its subject. Signature and structure
  /// are checked before expiry.
  fn validate(&self, token: &str) -> Result<String, TokenError>;
}
