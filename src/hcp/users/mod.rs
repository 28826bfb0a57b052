//! User account module

mod api;
mod models;

pub use api::Users;
pub use models::{TwoFactor, User, UserAttributes, UserUpdateOptions};
