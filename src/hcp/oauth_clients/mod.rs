//! OAuth clients module (VCS provider connections)

mod api;
mod models;

pub use api::{OAuthClients, OAuthTokens};
pub use models::{
    service_provider, OAuthClient, OAuthClientAttributes, OAuthClientCreateOptions,
    OAuthClientRelationships, OAuthClientUpdateOptions, OAuthToken, OAuthTokenAttributes,
    OAuthTokenRelationships, OAuthTokenUpdateOptions,
};
