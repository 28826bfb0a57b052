//! OAuth client and token data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::traits::TfeResource;

/// VCS providers that can be connected through an OAuth client
pub mod service_provider {
    pub const AZURE_DEVOPS_SERVER: &str = "ado_server";
    pub const AZURE_DEVOPS_SERVICES: &str = "ado_services";
    pub const BITBUCKET: &str = "bitbucket_hosted";
    pub const BITBUCKET_SERVER: &str = "bitbucket_server";
    pub const BITBUCKET_DATA_CENTER: &str = "bitbucket_data_center";
    pub const GITHUB: &str = "github";
    pub const GITHUB_ENTERPRISE: &str = "github_enterprise";
    pub const GITLAB: &str = "gitlab_hosted";
    pub const GITLAB_CE: &str = "gitlab_community_edition";
    pub const GITLAB_EE: &str = "gitlab_enterprise_edition";
}

/// OAuth Client data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct OAuthClient {
    pub id: String,
    pub attributes: OAuthClientAttributes,
    pub relationships: Option<OAuthClientRelationships>,
}

/// OAuth Client attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientAttributes {
    pub created_at: Option<DateTime<Utc>>,
    pub service_provider: Option<String>,
    pub service_provider_display_name: Option<String>,
    pub name: Option<String>,
    pub http_url: Option<String>,
    pub api_url: Option<String>,
    pub callback_url: Option<String>,
    pub connect_path: Option<String>,
    pub key: Option<String>,
    pub rsa_public_key: Option<String>,
    pub organization_scoped: Option<bool>,
}

/// OAuth Client relationships from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientRelationships {
    pub organization: Option<RelationshipData>,
    pub oauth_tokens: Option<RelationshipList>,
    pub agent_pool: Option<RelationshipData>,
}

impl TfeResource for OAuthClient {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes
            .name
            .as_deref()
            .or(self.attributes.service_provider_display_name.as_deref())
            .unwrap_or(&self.id)
    }
}

impl OAuthClient {
    /// Service provider key (github, gitlab_hosted, ...)
    pub fn service_provider(&self) -> &str {
        self.attributes
            .service_provider
            .as_deref()
            .unwrap_or("unknown")
    }

    pub fn service_provider_display_name(&self) -> &str {
        self.attributes
            .service_provider_display_name
            .as_deref()
            .unwrap_or("unknown")
    }

    /// HTTP URL of the VCS provider
    pub fn http_url(&self) -> &str {
        self.attributes.http_url.as_deref().unwrap_or("")
    }

    pub fn is_organization_scoped(&self) -> bool {
        self.attributes.organization_scoped.unwrap_or(true)
    }

    pub fn oauth_token_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.oauth_tokens.as_ref())
            .map(|ot| ot.ids())
            .unwrap_or_default()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.id())
    }
}

/// Options for creating an OAuth client
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub service_provider: String,
    pub api_url: String,
    pub http_url: String,
    /// Personal access token on the VCS provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
}

impl OAuthClientCreateOptions {
    pub fn new(
        service_provider: impl Into<String>,
        api_url: impl Into<String>,
        http_url: impl Into<String>,
    ) -> Self {
        Self {
            service_provider: service_provider.into(),
            api_url: api_url.into(),
            http_url: http_url.into(),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.api_url)) {
            return Err(ValidationError::RequiredApiUrl.into());
        }
        if !valid_string(Some(&self.http_url)) {
            return Err(ValidationError::RequiredHttpUrl.into());
        }
        if !valid_string(Some(&self.service_provider)) {
            return Err(ValidationError::RequiredServiceProvider.into());
        }
        // Bitbucket Server and Data Center authenticate with key pairs instead
        let uses_key_pair = matches!(
            self.service_provider.as_str(),
            service_provider::BITBUCKET_SERVER | service_provider::BITBUCKET_DATA_CENTER
        );
        if !uses_key_pair && !valid_string(self.oauth_token_string.as_deref()) {
            return Err(ValidationError::RequiredOAuthToken.into());
        }
        Ok(())
    }
}

/// Options for updating an OAuth client
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
}

/// OAuth Token data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct OAuthToken {
    pub id: String,
    pub attributes: Option<OAuthTokenAttributes>,
    pub relationships: Option<OAuthTokenRelationships>,
}

/// OAuth Token attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthTokenAttributes {
    pub created_at: Option<DateTime<Utc>>,
    pub service_provider_user: Option<String>,
    pub has_ssh_key: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthTokenRelationships {
    pub oauth_client: Option<RelationshipData>,
}

impl OAuthToken {
    pub fn service_provider_user(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.service_provider_user.as_deref())
            .unwrap_or("")
    }

    pub fn has_ssh_key(&self) -> bool {
        self.attributes
            .as_ref()
            .and_then(|a| a.has_ssh_key)
            .unwrap_or(false)
    }

    pub fn oauth_client_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.oauth_client.as_ref())
            .and_then(|c| c.id())
    }
}

/// Options for updating an OAuth token
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthTokenUpdateOptions {
    /// SSH key used to clone submodules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ssh_key: Option<String>,
}
