//! Run, plan and apply data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string_id;
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Individual run statuses for explicit filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    Fetching,
    FetchingCompleted,
    PrePlanRunning,
    PrePlanCompleted,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PostPlanRunning,
    PostPlanCompleted,
    PlannedAndFinished,
    PlannedAndSaved,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Pending => "pending",
            RunStatus::Fetching => "fetching",
            RunStatus::FetchingCompleted => "fetching_completed",
            RunStatus::PrePlanRunning => "pre_plan_running",
            RunStatus::PrePlanCompleted => "pre_plan_completed",
            RunStatus::Queuing => "queuing",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::CostEstimating => "cost_estimating",
            RunStatus::CostEstimated => "cost_estimated",
            RunStatus::PolicyChecking => "policy_checking",
            RunStatus::PolicyOverride => "policy_override",
            RunStatus::PolicySoftFailed => "policy_soft_failed",
            RunStatus::PolicyChecked => "policy_checked",
            RunStatus::Confirmed => "confirmed",
            RunStatus::PostPlanRunning => "post_plan_running",
            RunStatus::PostPlanCompleted => "post_plan_completed",
            RunStatus::PlannedAndFinished => "planned_and_finished",
            RunStatus::PlannedAndSaved => "planned_and_saved",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Discarded => "discarded",
            RunStatus::Errored => "errored",
            RunStatus::Canceled => "canceled",
            RunStatus::ForceCanceled => "force_canceled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RunStatus::Pending),
            "fetching" => Ok(RunStatus::Fetching),
            "fetching_completed" => Ok(RunStatus::FetchingCompleted),
            "pre_plan_running" => Ok(RunStatus::PrePlanRunning),
            "pre_plan_completed" => Ok(RunStatus::PrePlanCompleted),
            "queuing" => Ok(RunStatus::Queuing),
            "plan_queued" => Ok(RunStatus::PlanQueued),
            "planning" => Ok(RunStatus::Planning),
            "planned" => Ok(RunStatus::Planned),
            "cost_estimating" => Ok(RunStatus::CostEstimating),
            "cost_estimated" => Ok(RunStatus::CostEstimated),
            "policy_checking" => Ok(RunStatus::PolicyChecking),
            "policy_override" => Ok(RunStatus::PolicyOverride),
            "policy_soft_failed" => Ok(RunStatus::PolicySoftFailed),
            "policy_checked" => Ok(RunStatus::PolicyChecked),
            "confirmed" => Ok(RunStatus::Confirmed),
            "post_plan_running" => Ok(RunStatus::PostPlanRunning),
            "post_plan_completed" => Ok(RunStatus::PostPlanCompleted),
            "planned_and_finished" => Ok(RunStatus::PlannedAndFinished),
            "planned_and_saved" => Ok(RunStatus::PlannedAndSaved),
            "apply_queued" => Ok(RunStatus::ApplyQueued),
            "applying" => Ok(RunStatus::Applying),
            "applied" => Ok(RunStatus::Applied),
            "discarded" => Ok(RunStatus::Discarded),
            "errored" => Ok(RunStatus::Errored),
            "canceled" => Ok(RunStatus::Canceled),
            "force_canceled" => Ok(RunStatus::ForceCanceled),
            _ => Err(format!("Unknown run status: {}", s)),
        }
    }
}

impl RunStatus {
    /// Check if this is a non-final (active) status
    ///
    /// Final statuses are: applied, discarded, errored, canceled, force_canceled,
    /// planned_and_finished, planned_and_saved
    pub fn is_non_final(&self) -> bool {
        !matches!(
            self,
            RunStatus::Applied
                | RunStatus::Discarded
                | RunStatus::Errored
                | RunStatus::Canceled
                | RunStatus::ForceCanceled
                | RunStatus::PlannedAndFinished
                | RunStatus::PlannedAndSaved
        )
    }
}

/// Query options for listing runs
#[derive(Default, Debug, Clone)]
pub struct RunListOptions {
    pub list: ListOptions,
    /// Filter by status group: "non_final", "final", "discardable"
    pub status_group: Option<String>,
    /// Filter by specific statuses
    pub statuses: Vec<RunStatus>,
    /// Filter by operation: "plan_only", "plan_and_apply", "destroy", ...
    pub operations: Vec<String>,
    /// Filter by source: "tfe-api", "tfe-ui", "tfe-configuration-version", ...
    pub sources: Vec<String>,
    /// Filter by workspace names (organization endpoint only)
    pub workspace_names: Vec<String>,
    /// Search by commit SHA, message or creator
    pub search: Option<String>,
    pub include: Vec<String>,
}

impl RunListOptions {
    /// Runs that are still in progress
    pub fn non_final() -> Self {
        Self {
            status_group: Some("non_final".to_string()),
            ..Default::default()
        }
    }

    pub fn with_statuses(statuses: Vec<RunStatus>) -> Self {
        Self {
            statuses,
            ..Default::default()
        }
    }
}

/// Run data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    pub relationships: Option<RunRelationships>,
}

/// Run attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunAttributes {
    pub status: String,
    pub message: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "is-destroy")]
    pub is_destroy: Option<bool>,
    #[serde(rename = "plan-only")]
    pub plan_only: Option<bool>,
    #[serde(rename = "refresh-only")]
    pub refresh_only: Option<bool>,
    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "trigger-reason")]
    pub trigger_reason: Option<String>,
    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,
    #[serde(rename = "target-addrs")]
    pub target_addrs: Option<Vec<String>>,
    #[serde(rename = "replace-addrs")]
    pub replace_addrs: Option<Vec<String>>,
    #[serde(rename = "position-in-queue")]
    pub position_in_queue: Option<u32>,
    #[serde(rename = "status-timestamps")]
    pub status_timestamps: Option<serde_json::Value>,
    pub actions: Option<RunActions>,
}

/// Run action flags
#[derive(Deserialize, Debug, Clone)]
pub struct RunActions {
    #[serde(rename = "is-cancelable")]
    pub is_cancelable: Option<bool>,
    #[serde(rename = "is-confirmable")]
    pub is_confirmable: Option<bool>,
    #[serde(rename = "is-discardable")]
    pub is_discardable: Option<bool>,
    #[serde(rename = "is-force-cancelable")]
    pub is_force_cancelable: Option<bool>,
}

/// Run relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunRelationships {
    pub workspace: Option<RelationshipData>,
    #[serde(rename = "configuration-version")]
    pub configuration_version: Option<RelationshipData>,
    #[serde(rename = "created-by")]
    pub created_by: Option<RelationshipData>,
    pub plan: Option<RelationshipData>,
    pub apply: Option<RelationshipData>,
    #[serde(rename = "cost-estimate")]
    pub cost_estimate: Option<RelationshipData>,
}

impl TfeResource for Run {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // Runs don't have names, use ID
        &self.id
    }
}

impl Run {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    /// Status as a typed value, `None` for statuses this crate does not know
    pub fn run_status(&self) -> Option<RunStatus> {
        self.attributes.status.parse().ok()
    }

    /// Get the message, defaulting to empty string if not available
    pub fn message(&self) -> &str {
        self.attributes.message.as_deref().unwrap_or("")
    }

    /// Get the source, defaulting to "unknown" if not available
    pub fn source(&self) -> &str {
        self.attributes.source.as_deref().unwrap_or("unknown")
    }

    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    pub fn is_destroy(&self) -> bool {
        self.attributes.is_destroy.unwrap_or(false)
    }

    pub fn is_plan_only(&self) -> bool {
        self.attributes.plan_only.unwrap_or(false)
    }

    /// Get trigger reason, defaulting to "unknown" if not available
    pub fn trigger_reason(&self) -> &str {
        self.attributes
            .trigger_reason
            .as_deref()
            .unwrap_or("unknown")
    }

    fn related_id(&self, pick: fn(&RunRelationships) -> Option<&RelationshipData>) -> Option<&str> {
        self.relationships.as_ref().and_then(pick).and_then(|r| r.id())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.related_id(|r| r.workspace.as_ref())
    }

    pub fn plan_id(&self) -> Option<&str> {
        self.related_id(|r| r.plan.as_ref())
    }

    pub fn apply_id(&self) -> Option<&str> {
        self.related_id(|r| r.apply.as_ref())
    }

    pub fn configuration_version_id(&self) -> Option<&str> {
        self.related_id(|r| r.configuration_version.as_ref())
    }

    fn action(&self, pick: fn(&RunActions) -> Option<bool>) -> bool {
        self.attributes
            .actions
            .as_ref()
            .and_then(pick)
            .unwrap_or(false)
    }

    pub fn is_cancelable(&self) -> bool {
        self.action(|a| a.is_cancelable)
    }

    pub fn is_confirmable(&self) -> bool {
        self.action(|a| a.is_confirmable)
    }

    pub fn is_discardable(&self) -> bool {
        self.action(|a| a.is_discardable)
    }

    pub fn is_force_cancelable(&self) -> bool {
        self.action(|a| a.is_force_cancelable)
    }
}

/// Run-scoped variable value
#[derive(Serialize, Debug, Clone)]
pub struct RunVariable {
    pub key: String,
    /// HCL-encoded value, e.g. `"\"eu-west-1\""`
    pub value: String,
}

/// Options for queueing a run
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RunCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_destroy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_addrs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replace_addrs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<RunVariable>,
    /// Workspace to run in
    #[serde(skip)]
    pub workspace_id: String,
    /// Configuration to plan; the workspace's latest when unset
    #[serde(skip)]
    pub configuration_version_id: Option<String>,
}

impl RunCreateOptions {
    pub fn for_workspace(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.workspace_id.is_empty() {
            return Err(ValidationError::RequiredWorkspace.into());
        }
        if !valid_string_id(Some(&self.workspace_id)) {
            return Err(ValidationError::InvalidWorkspaceId.into());
        }
        if let Some(cv) = &self.configuration_version_id {
            if !valid_string_id(Some(cv)) {
                return Err(ValidationError::InvalidConfigVersionId.into());
            }
        }
        Ok(())
    }
}

/// Optional comment for run actions (apply, cancel, discard)
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunActionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RunActionOptions {
    pub fn comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
        }
    }
}

/// Run event from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunEvent {
    pub id: String,
    pub attributes: RunEventAttributes,
    pub relationships: Option<RunEventRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunEventAttributes {
    pub action: String,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunEventRelationships {
    pub target: Option<RelationshipData>,
}

impl RunEvent {
    pub fn action(&self) -> &str {
        &self.attributes.action
    }

    fn target(&self) -> Option<&crate::hcp::jsonapi::RelationshipId> {
        self.relationships
            .as_ref()
            .and_then(|r| r.target.as_ref())
            .and_then(|t| t.data.as_ref())
    }

    /// Get target ID
    pub fn target_id(&self) -> &str {
        self.target().map(|d| d.id.as_str()).unwrap_or("")
    }

    /// Get target type
    pub fn target_type(&self) -> &str {
        self.target()
            .and_then(|d| d.rel_type.as_deref())
            .unwrap_or("")
    }
}

/// Plan data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Plan {
    pub id: String,
    pub attributes: PlanAttributes,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlanAttributes {
    pub status: String,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "resource-additions")]
    pub resource_additions: Option<i32>,
    #[serde(rename = "resource-changes")]
    pub resource_changes: Option<i32>,
    #[serde(rename = "resource-destructions")]
    pub resource_destructions: Option<i32>,
    #[serde(rename = "resource-imports")]
    pub resource_imports: Option<i32>,
    #[serde(rename = "log-read-url")]
    pub log_read_url: Option<String>,
    #[serde(rename = "status-timestamps")]
    pub status_timestamps: Option<serde_json::Value>,
}

/// Statuses after which plan and apply logs stop growing
fn is_final_phase(status: &str) -> bool {
    matches!(status, "finished" | "errored" | "canceled" | "unreachable")
}

impl Plan {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    pub fn resource_additions(&self) -> i32 {
        self.attributes.resource_additions.unwrap_or(0)
    }

    pub fn resource_changes(&self) -> i32 {
        self.attributes.resource_changes.unwrap_or(0)
    }

    pub fn resource_destructions(&self) -> i32 {
        self.attributes.resource_destructions.unwrap_or(0)
    }

    pub fn resource_imports(&self) -> i32 {
        self.attributes.resource_imports.unwrap_or(0)
    }

    /// Get log read URL (temporary, expires in 1 minute)
    pub fn log_read_url(&self) -> Option<&str> {
        self.attributes.log_read_url.as_deref()
    }

    pub fn is_final(&self) -> bool {
        is_final_phase(self.status())
    }
}

/// Apply data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Apply {
    pub id: String,
    pub attributes: ApplyAttributes,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplyAttributes {
    pub status: String,
    #[serde(rename = "resource-additions")]
    pub resource_additions: Option<i32>,
    #[serde(rename = "resource-changes")]
    pub resource_changes: Option<i32>,
    #[serde(rename = "resource-destructions")]
    pub resource_destructions: Option<i32>,
    #[serde(rename = "resource-imports")]
    pub resource_imports: Option<i32>,
    #[serde(rename = "log-read-url")]
    pub log_read_url: Option<String>,
    #[serde(rename = "status-timestamps")]
    pub status_timestamps: Option<serde_json::Value>,
}

impl Apply {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    pub fn resource_additions(&self) -> i32 {
        self.attributes.resource_additions.unwrap_or(0)
    }

    pub fn resource_changes(&self) -> i32 {
        self.attributes.resource_changes.unwrap_or(0)
    }

    pub fn resource_destructions(&self) -> i32 {
        self.attributes.resource_destructions.unwrap_or(0)
    }

    pub fn resource_imports(&self) -> i32 {
        self.attributes.resource_imports.unwrap_or(0)
    }

    /// Get log read URL (temporary, expires in 1 minute)
    pub fn log_read_url(&self) -> Option<&str> {
        self.attributes.log_read_url.as_deref()
    }

    pub fn is_final(&self) -> bool {
        is_final_phase(self.status())
    }
}
