//! State versions module

mod api;
mod models;

pub use api::{StateVersionOutputs, StateVersions};
pub use models::{
    EmptyTerraformState, StateVersion, StateVersionAttributes, StateVersionCreateOptions,
    StateVersionListOptions, StateVersionOutput, StateVersionOutputAttributes,
    StateVersionRelationships, StateVersionResource, TerraformState,
};
