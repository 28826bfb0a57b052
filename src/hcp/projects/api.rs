//! Project API operations

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Project, ProjectCreateOptions, ProjectListOptions, ProjectUpdateOptions};

/// Projects service
pub struct Projects<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn projects(&self) -> Projects<'_> {
        Projects { client: self }
    }
}

fn project_path(project_id: &str) -> String {
    format!("/{}/{}", api::PROJECTS, project_id)
}

impl Projects<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &ProjectListOptions,
    ) -> Result<ResourceList<Project>> {
        require_org(organization)?;

        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_list("filter[names]", &options.names)
            .push_opt("q", options.query.as_deref());

        let path = format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::PROJECTS);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, project_id: &str) -> Result<Project> {
        require_id(project_id, ValidationError::InvalidProjectId)?;
        self.client.read_data(&project_path(project_id)).await
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &ProjectCreateOptions,
    ) -> Result<Project> {
        require_org(organization)?;
        options.valid()?;
        let body = RequestDocument::new("projects", options);
        let path = format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::PROJECTS);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(&self, project_id: &str, options: &ProjectUpdateOptions) -> Result<Project> {
        require_id(project_id, ValidationError::InvalidProjectId)?;
        options.valid()?;
        let body = RequestDocument::new("projects", options);
        self.client.update_data(&project_path(project_id), &body).await
    }

    pub async fn delete(&self, project_id: &str) -> Result<()> {
        require_id(project_id, ValidationError::InvalidProjectId)?;
        self.client.delete_path(&project_path(project_id)).await
    }
}
