pub mod admin;
pub mod auth;
pub mod request_id;

// Re-export middleware components for easier access
pub use admin::AdminGuard;
pub use auth::{AuthAccount, AuthMiddleware};
pub use request_id::{RequestId, RequestIdMiddleware};
