//! tfe-client - async client for the HCP Terraform / Terraform Enterprise API
//!
//! Every remote resource has a service handle on [`TfeClient`] with CRUD-style
//! methods. Options are validated before any request is sent, bodies are
//! encoded as JSON:API documents, and responses are decoded into typed
//! structs.
//!
//! # Features
//!
//! - Token resolution from env vars or the Terraform CLI credentials file
//! - Retry with backoff on rate limiting (and optionally server errors)
//! - Page-at-a-time listing plus parallel fetching of all pages
//! - Log streaming for plans, applies and policy checks
//!
//! # Example
//!
//! ```no_run
//! use tfe_client::{ListOptions, TfeClient};
//! use tfe_client::hcp::workspaces::WorkspaceListOptions;
//!
//! # async fn demo() -> tfe_client::Result<()> {
//! let client = TfeClient::from_env()?;
//! let page = client
//!     .workspaces()
//!     .list("my-org", &WorkspaceListOptions {
//!         search: Some("prod".to_string()),
//!         list: ListOptions::page(1, 20),
//!         ..Default::default()
//!     })
//!     .await?;
//! for ws in &page.items {
//!     println!("{} {}", ws.id, ws.attributes.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hcp;

pub use error::{Result, TfeError, ValidationError};
pub use hcp::{
    extract_log_message, human_readable_log, ClientConfig, ListOptions, LogReader, Pagination,
    RemoteInfo, ResourceList, RetryPolicy, TfeClient, TfeResource, TokenResolver,
};
