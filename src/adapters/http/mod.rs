pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ChangePasswordRequest, ErrorResponse, LoginRequest, RegisterRequest, SuccessResponse,
  TokenResponse, UpdateProfileRequest, UserListResponse, UserResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AdminGuard, AuthAccount, AuthMiddleware, RequestId, RequestIdMiddleware};
pub use routes::{configure_admin_routes, configure_auth_routes, configure_user_routes};
