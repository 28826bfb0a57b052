//! TFE API client module
//!
//! The shared request pipeline (`client`, `retry`, `jsonapi`, `query`) and one
//! submodule per remote resource. Each resource exposes a service handle
//! obtained from [`TfeClient`], e.g. `client.workspaces()`.

pub mod admin;
pub mod agent_pools;
mod client;
mod client_config;
pub mod comments;
pub mod configuration_versions;
mod credentials;
pub mod helpers;
pub mod jsonapi;
pub mod logs;
pub mod notifications;
pub mod oauth_clients;
pub mod org_memberships;
pub mod organizations;
pub mod policies;
pub mod policy_checks;
pub mod policy_sets;
pub mod projects;
pub mod query;
pub mod retry;
pub mod run_triggers;
pub mod runs;
pub mod ssh_keys;
pub mod stacks;
pub mod state;
pub mod tags;
pub mod teams;
pub mod traits;
pub mod users;
pub mod variable_sets;
pub mod variables;
pub mod workspaces;

use serde::Deserialize;

pub use client::{RemoteInfo, TfeClient};
pub use client_config::ClientConfig;
pub use credentials::TokenResolver;
pub use jsonapi::{RelationshipData, RelationshipId, RelationshipList};
pub use logs::{extract_log_message, human_readable_log, LogReader};
pub use query::ListOptions;
pub use retry::RetryPolicy;
pub use traits::{PaginatedResponse, ResourceList, TfeResource};

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Pagination details
///
/// Some endpoints (org-wide run lists) omit the totals, so they default to 0.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    #[serde(rename = "prev-page", default)]
    pub previous_page: Option<u32>,
    #[serde(rename = "next-page", default)]
    pub next_page: Option<u32>,
    #[serde(rename = "total-pages", default)]
    pub total_pages: u32,
    #[serde(rename = "total-count", default)]
    pub total_count: u32,
}
