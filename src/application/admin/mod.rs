//! Administrative account-management use cases
//!
//! Every use case here sits behind the admin role check in the transport
//! layer.

mod delete_user;
mod get_user;
mod list_users;
mod update_user;

pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::{ListUsersCommand, ListUsersResponse, ListUsersUseCase};
pub use update_user::{UpdateUserCommand, UpdateUserUseCase};
