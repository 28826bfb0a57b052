//! Policy check data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Sentinel policy evaluation attached to a run
#[derive(Deserialize, Debug, Clone)]
pub struct PolicyCheck {
    pub id: String,
    pub attributes: PolicyCheckAttributes,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyCheckAttributes {
    /// pending, queued, passed, soft_failed, hard_failed, overridden, errored, canceled, unreachable
    pub status: String,
    /// organization or workspace
    pub scope: Option<String>,
    pub result: Option<PolicyResult>,
    #[serde(default)]
    pub actions: PolicyCheckActions,
    #[serde(default)]
    pub permissions: PolicyCheckPermissions,
    pub status_timestamps: Option<serde_json::Value>,
}

/// Pass/fail counts of one evaluation
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyResult {
    #[serde(default)]
    pub advisory_failed: u32,
    #[serde(default)]
    pub hard_failed: u32,
    #[serde(default)]
    pub soft_failed: u32,
    #[serde(default)]
    pub total_failed: u32,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub duration: u64,
    /// Overall outcome
    #[serde(default)]
    pub result: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyCheckActions {
    #[serde(default)]
    pub is_overridable: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyCheckPermissions {
    #[serde(default)]
    pub can_override: bool,
}

impl TfeResource for PolicyCheck {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }
}

impl PolicyCheck {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    /// Output is only available once the check has been evaluated
    pub fn has_run(&self) -> bool {
        !matches!(self.status(), "pending" | "queued")
    }

    pub fn is_overridable(&self) -> bool {
        self.attributes.actions.is_overridable
    }
}
