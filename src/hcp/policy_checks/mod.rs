//! Policy checks module

mod api;
mod models;

pub use api::PolicyChecks;
pub use models::{
    PolicyCheck, PolicyCheckActions, PolicyCheckAttributes, PolicyCheckPermissions,
    PolicyResult,
};
