//! Workspace variable API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Variable, VariableCreateOptions, VariableUpdateOptions};

/// Workspace variables service
pub struct Variables<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn variables(&self) -> Variables<'_> {
        Variables { client: self }
    }
}

fn vars_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!("/{}/{}/vars", api::WORKSPACES, workspace_id))
}

fn var_path(workspace_id: &str, variable_id: &str) -> Result<String> {
    let base = vars_path(workspace_id)?;
    require_id(variable_id, ValidationError::InvalidVariableId)?;
    Ok(format!("{}/{}", base, variable_id))
}

impl Variables<'_> {
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<Variable>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&vars_path(workspace_id)?))
            .await
    }

    pub async fn read(&self, workspace_id: &str, variable_id: &str) -> Result<Variable> {
        self.client
            .read_data(&var_path(workspace_id, variable_id)?)
            .await
    }

    pub async fn create(
        &self,
        workspace_id: &str,
        options: &VariableCreateOptions,
    ) -> Result<Variable> {
        let path = vars_path(workspace_id)?;
        options.valid()?;
        debug!("Creating variable {} in {}", options.key, workspace_id);
        let body = RequestDocument::new("vars", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<Variable> {
        let path = var_path(workspace_id, variable_id)?;
        options.valid()?;
        let body = RequestDocument::new("vars", options).with_id(variable_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, workspace_id: &str, variable_id: &str) -> Result<()> {
        let path = var_path(workspace_id, variable_id)?;
        debug!("Deleting variable {} from {}", variable_id, workspace_id);
        self.client.delete_path(&path).await
    }
}
