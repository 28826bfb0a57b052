//! Workspace data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string_id;
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Query options for listing workspaces
#[derive(Default, Debug, Clone)]
pub struct WorkspaceListOptions {
    pub list: ListOptions,
    /// Filter by workspace name (fuzzy server-side search)
    pub search: Option<String>,
    /// Comma-separated tag names the workspace must carry (`search[tags]`)
    pub tags: Option<String>,
    /// Tag names the workspace must not carry (`search[exclude-tags]`)
    pub exclude_tags: Option<String>,
    /// Name pattern with `*` wildcards (`search[wildcard-name]`)
    pub wildcard_name: Option<String>,
    /// Filter by project ID
    pub project_id: Option<String>,
    /// Related resources to include, e.g. "current_run"
    pub include: Vec<String>,
}

/// Workspace data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
    pub relationships: Option<WorkspaceRelationships>,
}

/// Workspace relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct WorkspaceRelationships {
    pub project: Option<RelationshipData>,
    pub organization: Option<RelationshipData>,
    #[serde(rename = "current-run")]
    pub current_run: Option<RelationshipData>,
    #[serde(rename = "current-state-version")]
    pub current_state_version: Option<RelationshipData>,
    #[serde(rename = "locked-by")]
    pub locked_by: Option<RelationshipData>,
    #[serde(rename = "ssh-key")]
    pub ssh_key: Option<RelationshipData>,
    #[serde(rename = "agent-pool")]
    pub agent_pool: Option<RelationshipData>,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    /// Check if workspace name contains the given filter (substring match)
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.attributes.name.contains(filter)
    }

    /// Get resource count, defaulting to 0 if not available
    pub fn resource_count(&self) -> u32 {
        self.attributes.resource_count.unwrap_or(0)
    }

    /// Get execution mode, defaulting to "unknown" if not available
    pub fn execution_mode(&self) -> &str {
        self.attributes
            .execution_mode
            .as_deref()
            .unwrap_or("unknown")
    }

    /// Check if workspace is locked
    pub fn is_locked(&self) -> bool {
        self.attributes.locked.unwrap_or(false)
    }

    pub fn terraform_version(&self) -> &str {
        self.attributes
            .terraform_version
            .as_deref()
            .unwrap_or("unknown")
    }

    fn related_id(&self, pick: fn(&WorkspaceRelationships) -> Option<&RelationshipData>) -> Option<&str> {
        self.relationships.as_ref().and_then(pick).and_then(|r| r.id())
    }

    /// Get project ID if available
    pub fn project_id(&self) -> Option<&str> {
        self.related_id(|r| r.project.as_ref())
    }

    /// Get organization name if available (from relationships)
    pub fn organization_name(&self) -> Option<&str> {
        self.related_id(|r| r.organization.as_ref())
    }

    pub fn current_run_id(&self) -> Option<&str> {
        self.related_id(|r| r.current_run.as_ref())
    }

    pub fn current_state_version_id(&self) -> Option<&str> {
        self.related_id(|r| r.current_state_version.as_ref())
    }

    pub fn ssh_key_id(&self) -> Option<&str> {
        self.related_id(|r| r.ssh_key.as_ref())
    }
}

/// Workspace attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspaceAttributes {
    pub name: String,
    pub description: Option<String>,

    #[serde(rename = "execution-mode")]
    pub execution_mode: Option<String>,

    #[serde(rename = "resource-count")]
    pub resource_count: Option<u32>,

    pub locked: Option<bool>,

    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,

    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,

    #[serde(rename = "allow-destroy-plan")]
    pub allow_destroy_plan: Option<bool>,

    #[serde(rename = "file-triggers-enabled")]
    pub file_triggers_enabled: Option<bool>,

    #[serde(rename = "global-remote-state")]
    pub global_remote_state: Option<bool>,

    #[serde(rename = "queue-all-runs")]
    pub queue_all_runs: Option<bool>,

    #[serde(rename = "speculative-enabled")]
    pub speculative_enabled: Option<bool>,

    #[serde(rename = "working-directory")]
    pub working_directory: Option<String>,

    #[serde(rename = "trigger-prefixes", default)]
    pub trigger_prefixes: Vec<String>,

    #[serde(rename = "trigger-patterns", default)]
    pub trigger_patterns: Vec<String>,

    #[serde(rename = "vcs-repo")]
    pub vcs_repo: Option<VcsRepo>,

    #[serde(rename = "tag-names", default)]
    pub tag_names: Vec<String>,

    pub permissions: Option<WorkspacePermissions>,

    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updated-at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// VCS connection of a workspace
#[derive(Deserialize, Debug, Clone)]
pub struct VcsRepo {
    pub identifier: String,
    pub branch: Option<String>,
    #[serde(rename = "ingress-submodules")]
    pub ingress_submodules: Option<bool>,
    #[serde(rename = "oauth-token-id")]
    pub oauth_token_id: Option<String>,
    #[serde(rename = "repository-http-url")]
    pub repository_http_url: Option<String>,
    #[serde(rename = "service-provider")]
    pub service_provider: Option<String>,
    #[serde(rename = "tags-regex")]
    pub tags_regex: Option<String>,
}

/// What the current token may do with a workspace
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct WorkspacePermissions {
    pub can_destroy: bool,
    pub can_force_unlock: bool,
    pub can_lock: bool,
    pub can_queue_apply: bool,
    pub can_queue_destroy: bool,
    pub can_queue_run: bool,
    pub can_read_settings: bool,
    pub can_unlock: bool,
    pub can_update: bool,
    pub can_update_variable: bool,
}

/// VCS settings for create/update
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRepoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_submodules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_regex: Option<String>,
}

/// Settings shared by create and update
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_destroy_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessments_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply_run_trigger: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "remote", "local" or "agent"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_triggers_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_remote_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_all_runs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_prefixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
}

impl WorkspaceSettings {
    fn valid(&self) -> Result<()> {
        let agent_mode = self.execution_mode.as_deref() == Some("agent");
        match (&self.agent_pool_id, agent_mode) {
            (Some(_), false) => return Err(ValidationError::RequiredAgentMode.into()),
            (None, true) => return Err(ValidationError::RequiredAgentPoolId.into()),
            _ => {}
        }
        let has = |v: &Option<Vec<String>>| v.as_ref().is_some_and(|l| !l.is_empty());
        if has(&self.trigger_prefixes) && has(&self.trigger_patterns) {
            return Err(ValidationError::BothTriggerPatternsAndPrefixes.into());
        }
        Ok(())
    }
}

/// Options for creating a workspace
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceCreateOptions {
    pub name: String,
    #[serde(flatten)]
    pub settings: WorkspaceSettings,
    #[serde(rename = "source-name", skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(rename = "source-url", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(rename = "tag-names", skip_serializing_if = "Vec::is_empty")]
    pub tag_names: Vec<String>,
    /// Project to create the workspace in (organization default when unset)
    #[serde(skip)]
    pub project_id: Option<String>,
}

impl WorkspaceCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ValidationError::RequiredName.into());
        }
        if !valid_string_id(Some(&self.name)) {
            return Err(ValidationError::InvalidName.into());
        }
        self.settings.valid()
    }
}

/// Options for updating a workspace; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceUpdateOptions {
    /// Rename the workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub settings: WorkspaceSettings,
    /// Move to another project
    #[serde(skip)]
    pub project_id: Option<String>,
}

impl WorkspaceUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !valid_string_id(Some(name)) {
                return Err(ValidationError::InvalidName.into());
            }
        }
        self.settings.valid()
    }
}

/// Options for locking a workspace
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceLockOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;

    fn create_test_workspace(name: &str, locked: bool) -> Workspace {
        Workspace {
            id: format!("ws-{}", name),
            attributes: WorkspaceAttributes {
                name: name.to_string(),
                execution_mode: Some("remote".to_string()),
                resource_count: Some(42),
                locked: Some(locked),
                terraform_version: Some("1.5.0".to_string()),
                ..Default::default()
            },
            relationships: None,
        }
    }

    #[test]
    fn test_workspace_name() {
        let ws = create_test_workspace("my-workspace", false);
        assert_eq!(ws.name(), "my-workspace");
    }

    #[test]
    fn test_workspace_matches_filter() {
        let ws = create_test_workspace("gcp-dev-app-1234", false);
        assert!(ws.matches_filter("dev"));
        assert!(!ws.matches_filter("prod"));
    }

    #[test]
    fn test_workspace_defaults() {
        let ws: Workspace =
            serde_json::from_str(r#"{"id": "ws-1", "attributes": {"name": "bare"}}"#).unwrap();
        assert_eq!(ws.resource_count(), 0);
        assert_eq!(ws.execution_mode(), "unknown");
        assert!(!ws.is_locked());
        assert!(ws.attributes.tag_names.is_empty());
        assert!(ws.project_id().is_none());
    }

    #[test]
    fn test_workspace_is_locked() {
        assert!(create_test_workspace("locked", true).is_locked());
        assert!(!create_test_workspace("unlocked", false).is_locked());
    }

    #[test]
    fn test_workspace_relationships() {
        let ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-123",
            "type": "workspaces",
            "attributes": {
                "name": "test",
                "created-at": "2024-05-01T10:00:00.000Z",
                "vcs-repo": {"identifier": "org/repo", "branch": "main"},
                "permissions": {"can-queue-run": true}
            },
            "relationships": {
                "project": {"data": {"id": "prj-456", "type": "projects"}},
                "organization": {"data": {"id": "my-org", "type": "organizations"}},
                "current-run": {"data": {"id": "run-1", "type": "runs"}},
                "ssh-key": {"data": null}
            }
        }))
        .unwrap();

        assert_eq!(ws.project_id(), Some("prj-456"));
        assert_eq!(ws.organization_name(), Some("my-org"));
        assert_eq!(ws.current_run_id(), Some("run-1"));
        assert!(ws.ssh_key_id().is_none());
        assert_eq!(ws.attributes.vcs_repo.unwrap().identifier, "org/repo");
        assert!(ws.attributes.permissions.unwrap().can_queue_run);
    }

    #[test]
    fn test_create_options_validation() {
        assert!(WorkspaceCreateOptions::new("app-prod").valid().is_ok());
        assert!(matches!(
            WorkspaceCreateOptions::new("").valid(),
            Err(TfeError::Validation(ValidationError::RequiredName))
        ));
        assert!(matches!(
            WorkspaceCreateOptions::new("has space").valid(),
            Err(TfeError::Validation(ValidationError::InvalidName))
        ));

        let mut opts = WorkspaceCreateOptions::new("agent-ws");
        opts.settings.execution_mode = Some("agent".to_string());
        assert!(matches!(
            opts.valid(),
            Err(TfeError::Validation(ValidationError::RequiredAgentPoolId))
        ));
        opts.settings.agent_pool_id = Some("apool-1".to_string());
        assert!(opts.valid().is_ok());

        let mut opts = WorkspaceCreateOptions::new("pool-only");
        opts.settings.agent_pool_id = Some("apool-1".to_string());
        assert!(matches!(
            opts.valid(),
            Err(TfeError::Validation(ValidationError::RequiredAgentMode))
        ));
    }

    #[test]
    fn test_trigger_prefixes_and_patterns_conflict() {
        let opts = WorkspaceUpdateOptions {
            settings: WorkspaceSettings {
                trigger_prefixes: Some(vec!["modules/".to_string()]),
                trigger_patterns: Some(vec!["**/*.tf".to_string()]),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            opts.valid(),
            Err(TfeError::Validation(
                ValidationError::BothTriggerPatternsAndPrefixes
            ))
        ));
    }

    #[test]
    fn test_create_options_serialization() {
        let mut opts = WorkspaceCreateOptions::new("app");
        opts.settings.auto_apply = Some(true);
        opts.settings.vcs_repo = Some(VcsRepoOptions {
            identifier: Some("org/app".to_string()),
            oauth_token_id: Some("ot-1".to_string()),
            ..Default::default()
        });
        opts.tag_names = vec!["prod".to_string()];
        opts.project_id = Some("prj-1".to_string());

        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({
                "name": "app",
                "auto-apply": true,
                "vcs-repo": {"identifier": "org/app", "oauth-token-id": "ot-1"},
                "tag-names": ["prod"]
            })
        );
    }
}
