pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
#[cfg(test)]
pub mod test_support;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Account, AccountRole, AccountStatus};
pub use errors::{AuthError, HashError, RepositoryError, TokenError, ValidationError};
pub use ports::{AccountRepository, PasswordHasher, TokenService};
pub use services::{AccessControl, AuthService};
pub use value_objects::{Email, Password};
