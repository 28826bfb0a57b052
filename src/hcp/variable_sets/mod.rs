//! Variable set module

mod api;
mod models;

pub use api::{VariableSetVariables, VariableSets};
pub use models::{
    VariableSet, VariableSetAttributes, VariableSetCreateOptions, VariableSetListOptions,
    VariableSetRelationships, VariableSetUpdateOptions,
};
