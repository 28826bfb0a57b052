//! State version API operations

use bytes::Bytes;
use log::{debug, warn};
use std::time::Duration;

use crate::config::api;
use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::{poll_until, require_id, valid_string};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::workspaces::WorkspaceLockOptions;
use crate::hcp::TfeClient;

use super::models::{
    EmptyTerraformState, StateVersion, StateVersionCreateOptions, StateVersionListOptions,
    StateVersionOutput, TerraformState,
};

/// State versions service
pub struct StateVersions<'a> {
    client: &'a TfeClient,
}

/// State version outputs service
pub struct StateVersionOutputs<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn state_versions(&self) -> StateVersions<'_> {
        StateVersions { client: self }
    }

    pub fn state_version_outputs(&self) -> StateVersionOutputs<'_> {
        StateVersionOutputs { client: self }
    }
}

fn state_version_path(sv_id: &str) -> Result<String> {
    require_id(sv_id, ValidationError::InvalidStateVersionId)?;
    Ok(format!("/state-versions/{}", sv_id))
}

fn workspace_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!("/{}/{}", api::WORKSPACES, workspace_id))
}

impl StateVersions<'_> {
    /// List state versions of a workspace, identified by organization and workspace name
    pub async fn list(&self, options: &StateVersionListOptions) -> Result<ResourceList<StateVersion>> {
        if !valid_string(Some(&options.organization)) {
            return Err(ValidationError::InvalidOrg.into());
        }
        if !valid_string(Some(&options.workspace)) {
            return Err(ValidationError::RequiredWorkspace.into());
        }

        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push("filter[organization][name]", &options.organization)
            .push("filter[workspace][name]", &options.workspace);
        self.client.list_page(&query.apply("/state-versions")).await
    }

    pub async fn read(&self, sv_id: &str) -> Result<StateVersion> {
        self.client.read_data(&state_version_path(sv_id)?).await
    }

    /// Current state version of a workspace; `NotFound` for a workspace without state
    pub async fn read_current(&self, workspace_id: &str) -> Result<StateVersion> {
        let path = format!("{}/current-state-version", workspace_path(workspace_id)?);
        debug!("Fetching current state version for: {}", workspace_id);
        self.client.read_data(&path).await
    }

    /// Upload a new state version; the workspace must be locked by the caller
    pub async fn create(
        &self,
        workspace_id: &str,
        options: &StateVersionCreateOptions,
    ) -> Result<StateVersion> {
        let path = format!("{}/state-versions", workspace_path(workspace_id)?);
        options.valid()?;

        debug!(
            "Uploading state version (serial: {:?}) for: {}",
            options.serial, workspace_id
        );
        let body = RequestDocument::new("state-versions", options).relate_opt(
            "run",
            "runs",
            options.run_id.as_deref(),
        );
        self.client
            .create_data(&path, &body)
            .await
            .map_err(|e| match e {
                TfeError::Api { status: 409, .. } => TfeError::Api {
                    status: 409,
                    message: format!(
                        "State version conflict for '{}'. Another state may have been uploaded.",
                        workspace_id
                    ),
                },
                other => other,
            })
    }

    /// Raw state file behind a state version's download URL
    pub async fn download(&self, download_url: &str) -> Result<Bytes> {
        if download_url.is_empty() {
            return Err(ValidationError::RequiredUrl.into());
        }
        debug!("Downloading state from: {}", download_url);
        self.client.get_bytes(download_url).await
    }

    /// Download and parse the current state of a workspace
    pub async fn download_current(&self, workspace_id: &str) -> Result<TerraformState> {
        let sv = self.read_current(workspace_id).await?;
        let url = sv.download_url().ok_or_else(|| {
            TfeError::Unavailable(format!("State version '{}' has no download URL", sv.id))
        })?;
        let raw = self.download(url).await?;
        serde_json::from_slice(&raw)
            .map_err(|e| TfeError::Json(format!("Failed to parse state file: {}", e)))
    }

    /// Replace the workspace state with an empty successor of the current one
    ///
    /// The workspace is locked for the upload and unlocked afterwards, also
    /// when the download or upload fails. A failed unlock is only logged.
    pub async fn purge(&self, workspace_id: &str) -> Result<StateVersion> {
        require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
        let workspaces = self.client.workspaces();
        let lock = WorkspaceLockOptions {
            reason: Some("Purging state".to_string()),
        };
        workspaces.lock(workspace_id, &lock).await?;
        debug!("Workspace {} locked for purge", workspace_id);

        let result = self.upload_empty_successor(workspace_id).await;

        match workspaces.unlock(workspace_id).await {
            Ok(_) => debug!("Workspace {} unlocked", workspace_id),
            Err(e) => warn!(
                "Failed to unlock workspace {} after purge, unlock it manually: {}",
                workspace_id, e
            ),
        }
        result
    }

    async fn upload_empty_successor(&self, workspace_id: &str) -> Result<StateVersion> {
        let current = self.download_current(workspace_id).await?;
        debug!(
            "Purging {} resources from {} (serial {})",
            current.resources.len(),
            workspace_id,
            current.serial
        );
        let empty = EmptyTerraformState::from_current(&current);
        self.create(workspace_id, &empty.to_create_options()?).await
    }

    pub async fn list_outputs(
        &self,
        sv_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<StateVersionOutput>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("{}/outputs", state_version_path(sv_id)?);
        self.client.list_page(&query.apply(&path)).await
    }

    /// Poll until outputs and resources have been extracted from the state
    pub async fn wait_until_processed(
        &self,
        sv_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<StateVersion> {
        require_id(sv_id, ValidationError::InvalidStateVersionId)?;
        let what = format!("state version {} processing", sv_id);
        poll_until(&what, interval, max_attempts, move || async move {
            let sv = self.read(sv_id).await?;
            Ok(sv.resources_processed().then_some(sv))
        })
        .await
    }
}

impl StateVersionOutputs<'_> {
    /// Read one output; sensitive values are included
    pub async fn read(&self, output_id: &str) -> Result<StateVersionOutput> {
        require_id(output_id, ValidationError::InvalidOutputId)?;
        self.client
            .read_data(&format!("/state-version-outputs/{}", output_id))
            .await
    }

    /// Outputs of the workspace's current state version
    pub async fn read_current(&self, workspace_id: &str) -> Result<ResourceList<StateVersionOutput>> {
        let path = format!("{}/current-state-version-outputs", workspace_path(workspace_id)?);
        self.client.list_page(&path).await
    }
}
