use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::Password;

/// Argon2id password hasher implementation
///
/// Uses the Argon2id algorithm with secure parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
/// - Algorithm: Argon2id (resistant to both side-channel and GPU attacks)
///
/// The key derivation itself runs on the blocking thread pool, so concurrent
/// hash and verify calls are scheduled independently instead of stalling the
/// async workers.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  /// Creates a new Argon2PasswordHasher with the specified parameters
  pub fn new() -> Result<Self, AuthError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    // Time cost: 2 iterations
    let time_cost = 2;
    // Parallelism: 1 thread
    let parallelism = 1;
    // Output length: 32 bytes (default)
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

impl Default for Argon2PasswordHasher {
  fn default() -> Self {
    Self::new().expect("Failed to create default Argon2PasswordHasher")
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  /// Hashes a plain text password using Argon2id
  ///
  /// # Arguments
  /// * `password` - The password to hash
  ///
  /// # Returns
  /// * `Ok(String)` - The PHC hash string, salted freshly for this call
  /// * `Err(AuthError)` - If hashing fails
  async fn hash(&self, password: &Password) -> Result<String, AuthError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      // Generate a random salt using the OS's cryptographically secure RNG
      let salt = SaltString::generate(&mut rand::rngs::OsRng);

      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Blocking task failed: {}",
        e
      )))
    })?
    .map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to hash password: {}",
        e
      )))
    })?;

    Ok(hash)
  }

  /// Verifies a plain text password against a stored hash string
  ///
  /// Uses constant-time comparison to prevent timing attacks
  ///
  /// # Arguments
  /// * `password` - The plain text password to verify
  /// * `password_hash` - The PHC hash string to verify against
  ///
  /// # Returns
  /// * `Ok(true)` - If the password matches
  /// * `Ok(false)` - If the password does not match, or the stored hash
  ///   string is malformed
  /// * `Err(AuthError)` - If verification fails for environmental reasons
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();
    let password_hash = password_hash.to_owned();

    let outcome = tokio::task::spawn_blocking(move || {
      let parsed_hash = match Argon2PasswordHash::new(&password_hash) {
        Ok(parsed) => parsed,
        // A stored hash we cannot parse can never match
        Err(_) => return Ok(false),
      };

      match argon2.verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::VerificationFailed(format!(
          "Password verification failed: {}",
          e
        ))),
      }
    })
    .await
    .map_err(|e| {
      AuthError::Hash(HashError::VerificationFailed(format!(
        "Blocking task failed: {}",
        e
      )))
    })?;

    outcome.map_err(AuthError::Hash)
  }
}
