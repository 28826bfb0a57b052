//! Agent pool and agent token API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{
    AgentPool, AgentPoolCreateOptions, AgentPoolListOptions, AgentPoolUpdateOptions, AgentToken,
    AgentTokenCreateOptions,
};

/// Agent pools service
pub struct AgentPools<'a> {
    client: &'a TfeClient,
}

/// Agent tokens service
pub struct AgentTokens<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn agent_pools(&self) -> AgentPools<'_> {
        AgentPools { client: self }
    }

    pub fn agent_tokens(&self) -> AgentTokens<'_> {
        AgentTokens { client: self }
    }
}

fn org_pools_path(organization: &str) -> Result<String> {
    require_org(organization)?;
    Ok(format!("/{}/{}/agent-pools", api::ORGANIZATIONS, organization))
}

fn pool_path(pool_id: &str) -> Result<String> {
    require_id(pool_id, ValidationError::InvalidAgentPoolId)?;
    Ok(format!("/agent-pools/{}", pool_id))
}

fn token_path(token_id: &str) -> Result<String> {
    require_id(token_id, ValidationError::InvalidAgentTokenId)?;
    Ok(format!("/authentication-tokens/{}", token_id))
}

impl AgentPools<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &AgentPoolListOptions,
    ) -> Result<ResourceList<AgentPool>> {
        let path = org_pools_path(organization)?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("q", options.query.as_deref())
            .push_opt(
                "filter[allowed_workspaces][name]",
                options.allowed_workspaces_name.as_deref(),
            )
            .include(&options.include);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, pool_id: &str) -> Result<AgentPool> {
        self.client.read_data(&pool_path(pool_id)?).await
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &AgentPoolCreateOptions,
    ) -> Result<AgentPool> {
        let path = org_pools_path(organization)?;
        options.valid()?;
        debug!("Creating agent pool {} in {}", options.name, organization);
        let mut body = RequestDocument::new("agent-pools", options);
        if !options.allowed_workspace_ids.is_empty() {
            body = body.relate_many(
                "allowed-workspaces",
                "workspaces",
                &options.allowed_workspace_ids,
            );
        }
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        pool_id: &str,
        options: &AgentPoolUpdateOptions,
    ) -> Result<AgentPool> {
        let path = pool_path(pool_id)?;
        options.valid()?;
        let mut body = RequestDocument::new("agent-pools", options).with_id(pool_id);
        if let Some(ids) = &options.allowed_workspace_ids {
            body = body.relate_many("allowed-workspaces", "workspaces", ids);
        }
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, pool_id: &str) -> Result<()> {
        self.client.delete_path(&pool_path(pool_id)?).await
    }
}

impl AgentTokens<'_> {
    pub async fn list(&self, pool_id: &str, options: &ListOptions) -> Result<ResourceList<AgentToken>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("{}/authentication-tokens", pool_path(pool_id)?);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, token_id: &str) -> Result<AgentToken> {
        self.client.read_data(&token_path(token_id)?).await
    }

    /// Create a token; the secret is only present in this response
    pub async fn create(&self, pool_id: &str, options: &AgentTokenCreateOptions) -> Result<AgentToken> {
        let path = format!("{}/authentication-tokens", pool_path(pool_id)?);
        options.valid()?;
        let body = RequestDocument::new("authentication-tokens", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn delete(&self, token_id: &str) -> Result<()> {
        self.client.delete_path(&token_path(token_id)?).await
    }
}
