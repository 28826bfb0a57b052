//! Run triggers module

mod api;
mod models;

pub use api::RunTriggers;
pub use models::{
    RunTrigger, RunTriggerAttributes, RunTriggerCreateOptions, RunTriggerListOptions,
    RunTriggerRelationships, RunTriggerType,
};
