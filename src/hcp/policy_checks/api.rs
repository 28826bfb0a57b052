//! Policy check API operations

use log::debug;
use std::time::Duration;

use crate::config::logs;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{poll_until, require_id};
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::PolicyCheck;

/// Policy checks service
pub struct PolicyChecks<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn policy_checks(&self) -> PolicyChecks<'_> {
        PolicyChecks { client: self }
    }
}

fn policy_check_path(check_id: &str) -> Result<String> {
    require_id(check_id, ValidationError::InvalidPolicyCheckId)?;
    Ok(format!("/policy-checks/{}", check_id))
}

impl PolicyChecks<'_> {
    /// Policy checks of a run
    pub async fn list(&self, run_id: &str, options: &ListOptions) -> Result<ResourceList<PolicyCheck>> {
        require_id(run_id, ValidationError::InvalidRunId)?;
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("/runs/{}/policy-checks", run_id);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, check_id: &str) -> Result<PolicyCheck> {
        self.client.read_data(&policy_check_path(check_id)?).await
    }

    /// Override a soft-failed check so the run can continue
    pub async fn override_check(&self, check_id: &str) -> Result<PolicyCheck> {
        let path = format!("{}/actions/override", policy_check_path(check_id)?);
        debug!("Overriding policy check {}", check_id);
        self.client.post_for_data(&path).await
    }

    /// Sentinel output of the check, waiting for it to be evaluated first
    pub async fn logs(&self, check_id: &str) -> Result<String> {
        self.logs_with_interval(
            check_id,
            Duration::from_millis(logs::POLICY_CHECK_POLL_MS),
            logs::POLICY_CHECK_MAX_POLLS,
        )
        .await
    }

    pub async fn logs_with_interval(
        &self,
        check_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<String> {
        let path = format!("{}/output", policy_check_path(check_id)?);
        let what = format!("policy check {}", check_id);
        poll_until(&what, interval, max_attempts, move || async move {
            let pc = self.read(check_id).await?;
            Ok(pc.has_run().then_some(()))
        })
        .await?;

        let output = self.client.get_bytes(&path).await?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
