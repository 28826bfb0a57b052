//! Stacks module

mod api;
mod models;

pub use api::Stacks;
pub use models::{
    Stack, StackAttributes, StackCreateOptions, StackListOptions, StackRelationships,
    StackUpdateOptions, StackVcsRepo,
};
