//! Variable set API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{RelationshipList, RequestDocument};
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::variables::{Variable, VariableCreateOptions, VariableUpdateOptions};
use crate::hcp::TfeClient;

use super::models::{
    VariableSet, VariableSetCreateOptions, VariableSetListOptions, VariableSetUpdateOptions,
};

/// Variable sets service
pub struct VariableSets<'a> {
    client: &'a TfeClient,
}

/// Variables inside a variable set
pub struct VariableSetVariables<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn variable_sets(&self) -> VariableSets<'_> {
        VariableSets { client: self }
    }

    pub fn variable_set_variables(&self) -> VariableSetVariables<'_> {
        VariableSetVariables { client: self }
    }
}

fn varset_path(varset_id: &str) -> Result<String> {
    require_id(varset_id, ValidationError::InvalidVariableSetId)?;
    Ok(format!("/varsets/{}", varset_id))
}

fn list_query(options: &VariableSetListOptions) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .list_options(&options.list)
        .push_opt("q", options.query.as_deref())
        .include(&options.include);
    query
}

fn require_ids(ids: &[String], empty: ValidationError, invalid: ValidationError) -> Result<()> {
    if ids.is_empty() {
        return Err(empty.into());
    }
    for id in ids {
        require_id(id, invalid.clone())?;
    }
    Ok(())
}

impl VariableSets<'_> {
    /// Variable sets owned by an organization
    pub async fn list(
        &self,
        organization: &str,
        options: &VariableSetListOptions,
    ) -> Result<ResourceList<VariableSet>> {
        require_org(organization)?;
        let path = format!("/{}/{}/varsets", api::ORGANIZATIONS, organization);
        self.client.list_page(&list_query(options).apply(&path)).await
    }

    /// Variable sets applied to a workspace
    pub async fn list_for_workspace(
        &self,
        workspace_id: &str,
        options: &VariableSetListOptions,
    ) -> Result<ResourceList<VariableSet>> {
        require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
        let path = format!("/{}/{}/varsets", api::WORKSPACES, workspace_id);
        self.client.list_page(&list_query(options).apply(&path)).await
    }

    /// Variable sets applied to a project
    pub async fn list_for_project(
        &self,
        project_id: &str,
        options: &VariableSetListOptions,
    ) -> Result<ResourceList<VariableSet>> {
        require_id(project_id, ValidationError::InvalidProjectId)?;
        let path = format!("/{}/{}/varsets", api::PROJECTS, project_id);
        self.client.list_page(&list_query(options).apply(&path)).await
    }

    pub async fn read(&self, varset_id: &str, include: &[String]) -> Result<VariableSet> {
        let mut query = QueryParams::new();
        query.include(include);
        self.client
            .read_data(&query.apply(&varset_path(varset_id)?))
            .await
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &VariableSetCreateOptions,
    ) -> Result<VariableSet> {
        require_org(organization)?;
        options.valid()?;
        debug!("Creating variable set {} in {}", options.name, organization);
        let mut body = RequestDocument::new("varsets", options);
        if !options.workspace_ids.is_empty() {
            body = body.relate_many("workspaces", "workspaces", &options.workspace_ids);
        }
        if !options.project_ids.is_empty() {
            body = body.relate_many("projects", "projects", &options.project_ids);
        }
        self.client
            .create_data(
                &format!("/{}/{}/varsets", api::ORGANIZATIONS, organization),
                &body,
            )
            .await
    }

    pub async fn update(
        &self,
        varset_id: &str,
        options: &VariableSetUpdateOptions,
    ) -> Result<VariableSet> {
        let path = varset_path(varset_id)?;
        options.valid()?;
        let body = RequestDocument::new("varsets", options);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, varset_id: &str) -> Result<()> {
        let path = varset_path(varset_id)?;
        debug!("Deleting variable set {}", varset_id);
        self.client.delete_path(&path).await
    }

    pub async fn apply_to_workspaces(&self, varset_id: &str, workspace_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/workspaces", varset_path(varset_id)?);
        require_ids(
            workspace_ids,
            ValidationError::RequiredWorkspacesList,
            ValidationError::InvalidWorkspaceId,
        )?;
        let body = RelationshipList::of("workspaces", workspace_ids);
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_from_workspaces(
        &self,
        varset_id: &str,
        workspace_ids: &[String],
    ) -> Result<()> {
        let path = format!("{}/relationships/workspaces", varset_path(varset_id)?);
        require_ids(
            workspace_ids,
            ValidationError::RequiredWorkspacesList,
            ValidationError::InvalidWorkspaceId,
        )?;
        let body = RelationshipList::of("workspaces", workspace_ids);
        self.client.delete_with_body(&path, &body).await
    }

    pub async fn apply_to_projects(&self, varset_id: &str, project_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/projects", varset_path(varset_id)?);
        require_ids(
            project_ids,
            ValidationError::RequiredProject,
            ValidationError::InvalidProjectId,
        )?;
        let body = RelationshipList::of("projects", project_ids);
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_from_projects(&self, varset_id: &str, project_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/projects", varset_path(varset_id)?);
        require_ids(
            project_ids,
            ValidationError::RequiredProject,
            ValidationError::InvalidProjectId,
        )?;
        let body = RelationshipList::of("projects", project_ids);
        self.client.delete_with_body(&path, &body).await
    }
}

fn set_vars_path(varset_id: &str) -> Result<String> {
    Ok(format!("{}/relationships/vars", varset_path(varset_id)?))
}

fn set_var_path(varset_id: &str, variable_id: &str) -> Result<String> {
    let base = set_vars_path(varset_id)?;
    require_id(variable_id, ValidationError::InvalidVariableId)?;
    Ok(format!("{}/{}", base, variable_id))
}

impl VariableSetVariables<'_> {
    pub async fn list(
        &self,
        varset_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<Variable>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&set_vars_path(varset_id)?))
            .await
    }

    pub async fn read(&self, varset_id: &str, variable_id: &str) -> Result<Variable> {
        self.client
            .read_data(&set_var_path(varset_id, variable_id)?)
            .await
    }

    pub async fn create(
        &self,
        varset_id: &str,
        options: &VariableCreateOptions,
    ) -> Result<Variable> {
        let path = set_vars_path(varset_id)?;
        options.valid()?;
        let body = RequestDocument::new("vars", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        varset_id: &str,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<Variable> {
        let path = set_var_path(varset_id, variable_id)?;
        options.valid()?;
        let body = RequestDocument::new("vars", options).with_id(variable_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, varset_id: &str, variable_id: &str) -> Result<()> {
        let path = set_var_path(varset_id, variable_id)?;
        self.client.delete_path(&path).await
    }
}
