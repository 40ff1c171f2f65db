use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::ports::TokenService;

/// Minimum accepted length of the HMAC signing secret, in bytes
const MIN_SECRET_BYTES: usize = 32;

/// Claims carried inside an access token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  /// Subject (the account email)
  sub: String,
  /// Issued-at, as a Unix timestamp
  iat: i64,
  /// Expiration, as a Unix timestamp
  exp: i64,
}

/// Token service issuing and validating JWTs signed with HMAC-SHA256
///
/// The algorithm is pinned to HS256 on both sides, so a token carrying
/// any other `alg` header never verifies.
pub struct JwtTokenService {
  secret: Zeroizing<String>,
}

impl JwtTokenService {
  /// Creates a token service around the configured signing secret
  ///
  /// # Arguments
  /// * `secret` - HMAC signing secret, at least 32 bytes long
  ///
  /// # Errors
  /// Returns `TokenError::WeakSecret` when the secret is shorter than
  /// the minimum length
  pub fn new(secret: &str) -> Result<Self, TokenError> {
    if secret.len() < MIN_SECRET_BYTES {
      return Err(TokenError::WeakSecret {
        min: MIN_SECRET_BYTES,
      });
    }

    Ok(Self {
      secret: Zeroizing::new(secret.to_string()),
    })
  }

  fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    // No clock skew allowance: a token is rejected the second it expires
    validation.leeway = 0;
    validation
  }
}

impl TokenService for JwtTokenService {
  /// Issues a signed token for `subject` expiring after `ttl`
  ///
  /// # Errors
  /// Returns `TokenError::EncodingFailed` if signing fails
  fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
      sub: subject.to_string(),
      iat: now.timestamp(),
      exp: (now + ttl).timestamp(),
    };

    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(self.secret.as_bytes());

    encode(&header, &claims, &key).map_err(|e| TokenError::EncodingFailed(e.to_string()))
  }

  /// Validates a token and returns its subject
  ///
  /// # Errors
  /// Returns `TokenError::Expired` for expired tokens,
  /// `TokenError::BadSignature` for signature or algorithm mismatches and
  /// `TokenError::Malformed` for anything that does not parse as a JWT
  fn validate(&self, token: &str) -> Result<String, TokenError> {
    let key = DecodingKey::from_secret(self.secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Self::validation())?;

    Ok(data.claims.sub)
  }
}
