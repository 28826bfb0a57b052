//! Plan and apply phases of a run

use bytes::Bytes;
use log::debug;

use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::logs::LogReader;
use crate::hcp::TfeClient;

use super::api::run_path;
use super::models::{Apply, Plan};

/// Plans service
pub struct Plans<'a> {
    client: &'a TfeClient,
}

/// Applies service
pub struct Applies<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn plans(&self) -> Plans<'_> {
        Plans { client: self }
    }

    pub fn applies(&self) -> Applies<'_> {
        Applies { client: self }
    }
}

fn plan_path(plan_id: &str) -> Result<String> {
    require_id(plan_id, ValidationError::InvalidPlanId)?;
    Ok(format!("/plans/{}", plan_id))
}

fn apply_path(apply_id: &str) -> Result<String> {
    require_id(apply_id, ValidationError::InvalidApplyId)?;
    Ok(format!("/applies/{}", apply_id))
}

fn missing_log_url(kind: &str, id: &str) -> TfeError {
    TfeError::Unavailable(format!("{} '{}' has no log URL", kind, id))
}

impl<'a> Plans<'a> {
    pub async fn read(&self, plan_id: &str) -> Result<Plan> {
        self.client.read_data(&plan_path(plan_id)?).await
    }

    /// Plan of a run, by run ID
    pub async fn read_for_run(&self, run_id: &str) -> Result<Plan> {
        let path = format!("{}/plan", run_path(run_id)?);
        debug!("Fetching plan for run: {}", run_id);
        self.client.read_data(&path).await
    }

    /// Stream the plan log until the plan finishes
    pub async fn logs(&self, plan_id: &str) -> Result<LogReader<'a>> {
        let plan = self.read(plan_id).await?;
        let url = plan
            .log_read_url()
            .ok_or_else(|| missing_log_url("plan", plan_id))?;

        let client = self.client;
        let id = plan_id.to_string();
        LogReader::new(client, url, move || {
            let id = id.clone();
            async move { Ok(client.plans().read(&id).await?.is_final()) }
        })
    }

    /// Machine-readable plan (`terraform show -json` format)
    pub async fn read_json_output(&self, plan_id: &str) -> Result<Bytes> {
        let path = format!("{}/json-output", plan_path(plan_id)?);
        self.client.get_bytes(&path).await
    }
}

impl<'a> Applies<'a> {
    pub async fn read(&self, apply_id: &str) -> Result<Apply> {
        self.client.read_data(&apply_path(apply_id)?).await
    }

    /// Apply of a run, by run ID
    pub async fn read_for_run(&self, run_id: &str) -> Result<Apply> {
        let path = format!("{}/apply", run_path(run_id)?);
        debug!("Fetching apply for run: {}", run_id);
        self.client.read_data(&path).await
    }

    /// Stream the apply log until the apply finishes
    pub async fn logs(&self, apply_id: &str) -> Result<LogReader<'a>> {
        let apply = self.read(apply_id).await?;
        let url = apply
            .log_read_url()
            .ok_or_else(|| missing_log_url("apply", apply_id))?;

        let client = self.client;
        let id = apply_id.to_string();
        LogReader::new(client, url, move || {
            let id = id.clone();
            async move { Ok(client.applies().read(&id).await?.is_final()) }
        })
    }
}
