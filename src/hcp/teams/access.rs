//! Team workspace access API operations

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{TeamAccess, TeamAccessAddOptions, TeamAccessUpdateOptions};

/// Team access to workspaces (`team-workspaces`)
pub struct TeamAccessService<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn team_access(&self) -> TeamAccessService<'_> {
        TeamAccessService { client: self }
    }
}

impl TeamAccessService<'_> {
    /// Access bindings for one workspace
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<TeamAccess>> {
        require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
        let mut query = QueryParams::new();
        query
            .list_options(options)
            .push("filter[workspace][id]", workspace_id);
        self.client.list_page(&query.apply("/team-workspaces")).await
    }

    pub async fn read(&self, access_id: &str) -> Result<TeamAccess> {
        require_id(access_id, ValidationError::InvalidTeamAccessId)?;
        self.client
            .read_data(&format!("/team-workspaces/{}", access_id))
            .await
    }

    pub async fn add(&self, options: &TeamAccessAddOptions) -> Result<TeamAccess> {
        options.valid()?;
        let body = RequestDocument::new("team-workspaces", options)
            .relate_one("team", "teams", &options.team_id)
            .relate_one("workspace", "workspaces", &options.workspace_id);
        self.client.create_data("/team-workspaces", &body).await
    }

    pub async fn update(
        &self,
        access_id: &str,
        options: &TeamAccessUpdateOptions,
    ) -> Result<TeamAccess> {
        require_id(access_id, ValidationError::InvalidTeamAccessId)?;
        let body = RequestDocument::new("team-workspaces", options);
        self.client
            .update_data(&format!("/team-workspaces/{}", access_id), &body)
            .await
    }

    pub async fn remove(&self, access_id: &str) -> Result<()> {
        require_id(access_id, ValidationError::InvalidTeamAccessId)?;
        self.client
            .delete_path(&format!("/team-workspaces/{}", access_id))
            .await
    }
}
