//! Policy sets module

mod api;
mod models;

pub use api::PolicySets;
pub use models::{
    PolicySet, PolicySetAttributes, PolicySetCreateOptions, PolicySetListOptions,
    PolicySetRelationships, PolicySetUpdateOptions,
};
