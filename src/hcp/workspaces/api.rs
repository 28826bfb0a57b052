//! Workspace API operations

use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;
use serde_json::Map;

use crate::config::api;
use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{RelationshipList, RequestDocument};
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::tags::{Tag, TagRef};
use crate::hcp::traits::{ApiListResponse, ResourceList};
use crate::hcp::TfeClient;

use super::models::{
    Workspace, WorkspaceCreateOptions, WorkspaceListOptions, WorkspaceLockOptions,
    WorkspaceUpdateOptions,
};

/// Workspaces service
pub struct Workspaces<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn workspaces(&self) -> Workspaces<'_> {
        Workspaces { client: self }
    }
}

fn org_workspaces_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::WORKSPACES)
}

fn named_path(organization: &str, workspace: &str) -> Result<String> {
    require_org(organization)?;
    require_id(workspace, ValidationError::InvalidWorkspaceValue)?;
    Ok(format!("{}/{}", org_workspaces_path(organization), workspace))
}

fn id_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!("/{}/{}", api::WORKSPACES, workspace_id))
}

fn build_list_query(options: &WorkspaceListOptions) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .list_options(&options.list)
        .push_opt("search[name]", options.search.as_deref())
        .push_opt("search[tags]", options.tags.as_deref())
        .push_opt("search[exclude-tags]", options.exclude_tags.as_deref())
        .push_opt("search[wildcard-name]", options.wildcard_name.as_deref())
        .push_opt("filter[project][id]", options.project_id.as_deref())
        .include(&options.include);
    query
}

fn validate_tags(tags: &[TagRef]) -> Result<()> {
    if tags.is_empty() || tags.iter().any(TagRef::is_empty) {
        return Err(ValidationError::RequiredTags.into());
    }
    Ok(())
}

fn validate_consumers(workspace_ids: &[String]) -> Result<()> {
    if workspace_ids.is_empty() {
        return Err(ValidationError::RequiredWorkspacesList.into());
    }
    for id in workspace_ids {
        require_id(id, ValidationError::InvalidWorkspaceId)?;
    }
    Ok(())
}

fn create_body(options: &WorkspaceCreateOptions) -> RequestDocument<&WorkspaceCreateOptions> {
    RequestDocument::new("workspaces", options).relate_opt(
        "project",
        "projects",
        options.project_id.as_deref(),
    )
}

fn update_body(options: &WorkspaceUpdateOptions) -> RequestDocument<&WorkspaceUpdateOptions> {
    RequestDocument::new("workspaces", options).relate_opt(
        "project",
        "projects",
        options.project_id.as_deref(),
    )
}

impl Workspaces<'_> {
    /// List one page of workspaces in an organization
    pub async fn list(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<ResourceList<Workspace>> {
        require_org(organization)?;
        let path = build_list_query(options).apply(&org_workspaces_path(organization));
        debug!("Listing workspaces: {}", path);
        self.client.list_page(&path).await
    }

    /// Fetch every workspace matching the filters, all pages
    ///
    /// Page selection in `options.list` is ignored.
    pub async fn list_all(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        require_org(organization)?;
        let filters = WorkspaceListOptions {
            list: ListOptions::default(),
            ..options.clone()
        };
        let path = build_list_query(&filters).apply(&org_workspaces_path(organization));
        self.client
            .fetch_all_pages::<Workspace, ApiListResponse<Workspace>>(&path, "workspaces")
            .await
    }

    /// Read a workspace by organization and name
    pub async fn read(&self, organization: &str, workspace: &str) -> Result<Workspace> {
        let path = named_path(organization, workspace)?;
        self.client.read_data(&path).await
    }

    pub async fn read_by_id(&self, workspace_id: &str) -> Result<Workspace> {
        self.client.read_data(&id_path(workspace_id)?).await
    }

    /// Read several workspaces concurrently
    ///
    /// Missing workspaces are skipped; any other failure aborts the whole
    /// read. The result order is not guaranteed.
    pub async fn read_many_by_id(&self, workspace_ids: &[String]) -> Result<Vec<Workspace>> {
        if workspace_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results: Vec<Option<Workspace>> = stream::iter(workspace_ids)
            .map(|ws_id| async move {
                match self.read_by_id(ws_id).await {
                    Ok(ws) => Ok(Some(ws)),
                    Err(TfeError::NotFound) => {
                        debug!("Workspace '{}' not found (404), skipping", ws_id);
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            })
            .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .try_collect()
            .await?;

        Ok(results.into_iter().flatten().collect())
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &WorkspaceCreateOptions,
    ) -> Result<Workspace> {
        require_org(organization)?;
        options.valid()?;
        debug!("Creating workspace {} in {}", options.name, organization);
        self.client
            .create_data(&org_workspaces_path(organization), &create_body(options))
            .await
    }

    pub async fn update(
        &self,
        organization: &str,
        workspace: &str,
        options: &WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        let path = named_path(organization, workspace)?;
        options.valid()?;
        self.client.update_data(&path, &update_body(options)).await
    }

    pub async fn update_by_id(
        &self,
        workspace_id: &str,
        options: &WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        let path = id_path(workspace_id)?;
        options.valid()?;
        self.client.update_data(&path, &update_body(options)).await
    }

    pub async fn delete(&self, organization: &str, workspace: &str) -> Result<()> {
        let path = named_path(organization, workspace)?;
        debug!("Deleting workspace {}/{}", organization, workspace);
        self.client.delete_path(&path).await
    }

    pub async fn delete_by_id(&self, workspace_id: &str) -> Result<()> {
        let path = id_path(workspace_id)?;
        debug!("Deleting workspace {}", workspace_id);
        self.client.delete_path(&path).await
    }

    /// Delete only if the workspace manages no resources
    pub async fn safe_delete(&self, organization: &str, workspace: &str) -> Result<()> {
        let path = named_path(organization, workspace)?;
        self.client
            .post_empty(&format!("{}/actions/safe-delete", path))
            .await
    }

    pub async fn safe_delete_by_id(&self, workspace_id: &str) -> Result<()> {
        let path = id_path(workspace_id)?;
        self.client
            .post_empty(&format!("{}/actions/safe-delete", path))
            .await
    }

    /// Lock a workspace to prevent runs and state changes
    pub async fn lock(
        &self,
        workspace_id: &str,
        options: &WorkspaceLockOptions,
    ) -> Result<Workspace> {
        let path = format!("{}/actions/lock", id_path(workspace_id)?);
        debug!("Locking workspace: {}", workspace_id);
        match self.client.create_data(&path, options).await {
            Err(TfeError::Api { status: 409, .. }) => Err(TfeError::WorkspaceLocked),
            other => other,
        }
    }

    pub async fn unlock(&self, workspace_id: &str) -> Result<Workspace> {
        let path = format!("{}/actions/unlock", id_path(workspace_id)?);
        debug!("Unlocking workspace: {}", workspace_id);
        match self.client.post_for_data(&path).await {
            Err(TfeError::Api { status: 409, .. }) => Err(TfeError::WorkspaceNotLocked),
            other => other,
        }
    }

    /// Unlock a workspace locked by another user or run
    pub async fn force_unlock(&self, workspace_id: &str) -> Result<Workspace> {
        let path = format!("{}/actions/force-unlock", id_path(workspace_id)?);
        debug!("Force-unlocking workspace: {}", workspace_id);
        match self.client.post_for_data(&path).await {
            Err(TfeError::Api { status: 409, .. }) => Err(TfeError::WorkspaceNotLocked),
            other => other,
        }
    }

    pub async fn assign_ssh_key(&self, workspace_id: &str, ssh_key_id: &str) -> Result<Workspace> {
        require_id(ssh_key_id, ValidationError::InvalidSshKeyId)?;
        self.set_ssh_key(workspace_id, Some(ssh_key_id)).await
    }

    pub async fn unassign_ssh_key(&self, workspace_id: &str) -> Result<Workspace> {
        self.set_ssh_key(workspace_id, None).await
    }

    async fn set_ssh_key(&self, workspace_id: &str, ssh_key_id: Option<&str>) -> Result<Workspace> {
        let path = format!("{}/relationships/ssh-key", id_path(workspace_id)?);
        let body = RequestDocument::new("workspaces", serde_json::json!({ "id": ssh_key_id }));
        self.client.update_data(&path, &body).await
    }

    /// Move a workspace into another project
    pub async fn assign_to_project(
        &self,
        workspace_id: &str,
        project_id: &str,
    ) -> Result<Workspace> {
        let path = id_path(workspace_id)?;
        require_id(project_id, ValidationError::InvalidProjectId)?;
        debug!(
            "Assigning workspace {} to project {}",
            workspace_id, project_id
        );
        let body = RequestDocument::new("workspaces", Map::new()).relate_one(
            "project",
            "projects",
            project_id,
        );
        match self.client.update_data(&path, &body).await {
            Err(TfeError::Api { status: 422, message }) => Err(TfeError::Api {
                status: 422,
                message: format!(
                    "Cannot assign workspace '{}' to project '{}': {}. \
                     Hint: you need admin permissions on both the source and destination project",
                    workspace_id, project_id, message
                ),
            }),
            other => other,
        }
    }

    pub async fn list_tags(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<Tag>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("{}/relationships/tags", id_path(workspace_id)?);
        self.client.list_page(&query.apply(&path)).await
    }

    /// Attach tags by name (created on demand) or by ID
    pub async fn add_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        let path = format!("{}/relationships/tags", id_path(workspace_id)?);
        validate_tags(tags)?;
        self.client
            .post_body(&path, &serde_json::json!({ "data": tags }))
            .await
    }

    pub async fn remove_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        let path = format!("{}/relationships/tags", id_path(workspace_id)?);
        validate_tags(tags)?;
        self.client
            .delete_with_body(&path, &serde_json::json!({ "data": tags }))
            .await
    }

    /// Workspaces allowed to read this workspace's state outputs
    pub async fn list_remote_state_consumers(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<Workspace>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!(
            "{}/relationships/remote-state-consumers",
            id_path(workspace_id)?
        );
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn add_remote_state_consumers(
        &self,
        workspace_id: &str,
        consumer_ids: &[String],
    ) -> Result<()> {
        let path = format!(
            "{}/relationships/remote-state-consumers",
            id_path(workspace_id)?
        );
        validate_consumers(consumer_ids)?;
        let body = RelationshipList::of("workspaces", consumer_ids);
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_remote_state_consumers(
        &self,
        workspace_id: &str,
        consumer_ids: &[String],
    ) -> Result<()> {
        let path = format!(
            "{}/relationships/remote-state-consumers",
            id_path(workspace_id)?
        );
        validate_consumers(consumer_ids)?;
        let body = RelationshipList::of("workspaces", consumer_ids);
        self.client.delete_with_body(&path, &body).await
    }
}
