//! Run API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{Document, RequestDocument};
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Run, RunActionOptions, RunCreateOptions, RunEvent, RunListOptions};

/// Runs service
pub struct Runs<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn runs(&self) -> Runs<'_> {
        Runs { client: self }
    }
}

pub(super) fn run_path(run_id: &str) -> Result<String> {
    require_id(run_id, ValidationError::InvalidRunId)?;
    Ok(format!("/{}/{}", api::RUNS, run_id))
}

/// Server-side filters shared by the workspace and organization endpoints
fn append_run_filters(query: &mut QueryParams, options: &RunListOptions) {
    query
        .list_options(&options.list)
        .push_opt("filter[status_group]", options.status_group.as_deref())
        .push_list("filter[status]", &options.statuses)
        .push_list("filter[operation]", &options.operations)
        .push_list("filter[source]", &options.sources)
        .push_opt("search[basic]", options.search.as_deref())
        .include(&options.include);
}

impl Runs<'_> {
    /// List runs of a workspace, newest first
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &RunListOptions,
    ) -> Result<ResourceList<Run>> {
        require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
        let mut query = QueryParams::new();
        append_run_filters(&mut query, options);
        let path = query.apply(&format!("/{}/{}/{}", api::WORKSPACES, workspace_id, api::RUNS));
        debug!("Fetching runs: {}", path);
        self.client.list_page(&path).await
    }

    /// List runs across an organization
    ///
    /// This endpoint is rate limited to 30 requests per minute and does not
    /// report total counts.
    pub async fn list_for_organization(
        &self,
        organization: &str,
        options: &RunListOptions,
    ) -> Result<ResourceList<Run>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        append_run_filters(&mut query, options);
        query.push_list("filter[workspace_names]", &options.workspace_names);
        let path = query.apply(&format!(
            "/{}/{}/{}",
            api::ORGANIZATIONS,
            organization,
            api::RUNS
        ));
        debug!("Fetching organization runs: {}", path);
        self.client.list_page(&path).await
    }

    /// Follow `next-page` links across an organization's runs
    ///
    /// Pages are fetched sequentially since the endpoint reports no total.
    /// Stops early once `max_results` runs were collected.
    pub async fn list_all_for_organization(
        &self,
        organization: &str,
        options: &RunListOptions,
        max_results: Option<usize>,
    ) -> Result<Vec<Run>> {
        let mut all_runs = Vec::new();
        let mut opts = options.clone();
        opts.list = ListOptions {
            page_number: Some(options.list.page_number.unwrap_or(1)),
            page_size: Some(options.list.page_size.unwrap_or(api::DEFAULT_PAGE_SIZE)),
        };

        loop {
            let page = self.list_for_organization(organization, &opts).await?;
            let run_count = page.len();
            let next_page = page.pagination.as_ref().and_then(|p| p.next_page);
            all_runs.extend(page.items);

            if let Some(max) = max_results {
                if all_runs.len() >= max {
                    all_runs.truncate(max);
                    break;
                }
            }

            match next_page {
                Some(next) if run_count > 0 => opts.list.page_number = Some(next),
                _ => break,
            }
        }

        debug!(
            "Fetched {} runs for organization '{}'",
            all_runs.len(),
            organization
        );
        Ok(all_runs)
    }

    pub async fn read(&self, run_id: &str) -> Result<Run> {
        self.client.read_data(&run_path(run_id)?).await
    }

    /// Read a run with related resources (`plan`, `apply`, `workspace`, ...)
    pub async fn read_with_include(&self, run_id: &str, include: &[String]) -> Result<Document<Run>> {
        let mut query = QueryParams::new();
        query.include(include);
        self.client
            .read_document(&query.apply(&run_path(run_id)?))
            .await
    }

    /// Queue a new run
    pub async fn create(&self, options: &RunCreateOptions) -> Result<Run> {
        options.valid()?;
        debug!("Creating run in workspace {}", options.workspace_id);
        let body = RequestDocument::new("runs", options)
            .relate_one("workspace", "workspaces", &options.workspace_id)
            .relate_opt(
                "configuration-version",
                "configuration-versions",
                options.configuration_version_id.as_deref(),
            );
        self.client
            .create_data(&format!("/{}", api::RUNS), &body)
            .await
    }

    async fn action(&self, run_id: &str, action: &str, options: &RunActionOptions) -> Result<()> {
        let path = format!("{}/actions/{}", run_path(run_id)?, action);
        debug!("Run {}: {}", run_id, action);
        self.client.post_body(&path, options).await
    }

    /// Confirm a run that is waiting for confirmation
    pub async fn apply(&self, run_id: &str, options: &RunActionOptions) -> Result<()> {
        self.action(run_id, "apply", options).await
    }

    /// Cancel a run that is actively planning or applying
    ///
    /// The run must have is-cancelable: true in its actions.
    pub async fn cancel(&self, run_id: &str, options: &RunActionOptions) -> Result<()> {
        self.action(run_id, "cancel", options).await
    }

    /// Force-cancel a run whose cancel did not take effect
    pub async fn force_cancel(&self, run_id: &str, options: &RunActionOptions) -> Result<()> {
        self.action(run_id, "force-cancel", options).await
    }

    /// Discard a run that is waiting for confirmation or priority
    ///
    /// The run must have is-discardable: true in its actions.
    pub async fn discard(&self, run_id: &str, options: &RunActionOptions) -> Result<()> {
        self.action(run_id, "discard", options).await
    }

    /// Move a pending run to the front of the queue, discarding runs ahead of it
    pub async fn force_execute(&self, run_id: &str) -> Result<()> {
        let path = format!("{}/actions/force-execute", run_path(run_id)?);
        self.client.post_empty(&path).await
    }

    /// Lifecycle events of a run (queued, planned, confirmed, ...)
    pub async fn list_events(&self, run_id: &str) -> Result<ResourceList<RunEvent>> {
        let path = format!("{}/run-events", run_path(run_id)?);
        self.client.list_page(&path).await
    }
}
