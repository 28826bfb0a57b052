//! SSH keys module

mod api;
mod models;

pub use api::SshKeys;
pub use models::{SshKey, SshKeyAttributes, SshKeyCreateOptions, SshKeyUpdateOptions};
