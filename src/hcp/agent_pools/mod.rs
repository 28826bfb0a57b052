//! Agent pools module

mod api;
mod models;

pub use api::{AgentPools, AgentTokens};
pub use models::{
    AgentPool, AgentPoolAttributes, AgentPoolCreateOptions, AgentPoolListOptions,
    AgentPoolRelationships, AgentPoolUpdateOptions, AgentToken, AgentTokenAttributes,
    AgentTokenCreateOptions,
};
