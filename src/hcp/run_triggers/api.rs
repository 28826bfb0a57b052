//! Run trigger API operations

use serde_json::Map;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{RunTrigger, RunTriggerCreateOptions, RunTriggerListOptions};

/// Run triggers service
pub struct RunTriggers<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn run_triggers(&self) -> RunTriggers<'_> {
        RunTriggers { client: self }
    }
}

fn workspace_triggers_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!("/{}/{}/run-triggers", api::WORKSPACES, workspace_id))
}

fn run_trigger_path(trigger_id: &str) -> Result<String> {
    require_id(trigger_id, ValidationError::InvalidRunTriggerId)?;
    Ok(format!("/run-triggers/{}", trigger_id))
}

impl RunTriggers<'_> {
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &RunTriggerListOptions,
    ) -> Result<ResourceList<RunTrigger>> {
        let path = workspace_triggers_path(workspace_id)?;
        options.valid()?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("filter[run-trigger][type]", options.trigger_type)
            .include(&options.include);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, trigger_id: &str) -> Result<RunTrigger> {
        self.client.read_data(&run_trigger_path(trigger_id)?).await
    }

    /// Make `workspace_id` run after each apply in the sourceable workspace
    pub async fn create(
        &self,
        workspace_id: &str,
        options: &RunTriggerCreateOptions,
    ) -> Result<RunTrigger> {
        let path = workspace_triggers_path(workspace_id)?;
        options.valid()?;
        let body = RequestDocument::new("run-triggers", Map::new()).relate_one(
            "sourceable",
            "workspaces",
            &options.sourceable_id,
        );
        self.client.create_data(&path, &body).await
    }

    pub async fn delete(&self, trigger_id: &str) -> Result<()> {
        self.client.delete_path(&run_trigger_path(trigger_id)?).await
    }
}
