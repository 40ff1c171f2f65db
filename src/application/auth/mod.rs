//! Authentication and self-service account use cases
//!
//! This module contains the use cases reachable by any authenticated (or,
//! for register/login, anonymous) caller. Each use case orchestrates the
//! domain service to implement one workflow.

mod change_password;
mod login_user;
mod register_user;
mod update_profile;

pub use change_password::{ChangePasswordCommand, ChangePasswordUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileUseCase};
