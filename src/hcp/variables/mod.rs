//! Workspace variable module

mod api;
mod models;

pub use api::Variables;
pub use models::{
    CategoryType, Variable, VariableAttributes, VariableCreateOptions, VariableRelationships,
    VariableUpdateOptions,
};
