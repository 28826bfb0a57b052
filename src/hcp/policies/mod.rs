//! Policies module (Sentinel and OPA)

mod api;
mod models;

pub use api::Policies;
pub use models::{
    EnforcementLevel, Policy, PolicyAttributes, PolicyCreateOptions, PolicyKind,
    PolicyListOptions, PolicyRelationships, PolicyUpdateOptions,
};
