//! Policy set data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{valid_string, valid_string_id};
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::policies::PolicyKind;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;
use crate::hcp::workspaces::{VcsRepo, VcsRepoOptions};

/// Policy set data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct PolicySet {
    pub id: String,
    pub attributes: PolicySetAttributes,
    pub relationships: Option<PolicySetRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetAttributes {
    pub name: String,
    pub description: Option<String>,
    /// Applies to every workspace in the organization
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub kind: PolicyKind,
    /// Whether a failed mandatory check can be overridden (OPA)
    pub overridable: Option<bool>,
    pub policies_path: Option<String>,
    #[serde(default)]
    pub policy_count: u32,
    #[serde(default)]
    pub workspace_count: u32,
    #[serde(default)]
    pub project_count: u32,
    pub vcs_repo: Option<VcsRepo>,
    pub policy_tool_version: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetRelationships {
    pub organization: Option<RelationshipData>,
    pub policies: Option<RelationshipList>,
    pub workspaces: Option<RelationshipList>,
    pub projects: Option<RelationshipList>,
    pub workspace_exclusions: Option<RelationshipList>,
}

impl TfeResource for PolicySet {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl PolicySet {
    fn related_ids(&self, pick: fn(&PolicySetRelationships) -> Option<&RelationshipList>) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(pick)
            .map(|l| l.ids())
            .unwrap_or_default()
    }

    pub fn policy_ids(&self) -> Vec<&str> {
        self.related_ids(|r| r.policies.as_ref())
    }

    pub fn workspace_ids(&self) -> Vec<&str> {
        self.related_ids(|r| r.workspaces.as_ref())
    }

    pub fn project_ids(&self) -> Vec<&str> {
        self.related_ids(|r| r.projects.as_ref())
    }

    /// Policies come from a VCS repository rather than individual uploads
    pub fn is_versioned(&self) -> bool {
        self.attributes.vcs_repo.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicySetListOptions {
    pub list: ListOptions,
    /// Partial name match (`search[name]`)
    pub search: Option<String>,
    pub kind: Option<PolicyKind>,
    /// e.g. "policies", "workspaces", "projects"
    pub include: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PolicyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_tool_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
    #[serde(skip)]
    pub policy_ids: Vec<String>,
    #[serde(skip)]
    pub workspace_ids: Vec<String>,
    #[serde(skip)]
    pub project_ids: Vec<String>,
}

impl PolicySetCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.name)) {
            return Err(ValidationError::RequiredName.into());
        }
        if !valid_string_id(Some(&self.name)) {
            return Err(ValidationError::InvalidName.into());
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_tool_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
}

impl PolicySetUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !valid_string_id(Some(name)) {
                return Err(ValidationError::InvalidName.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;

    #[test]
    fn test_policy_set_deserialization() {
        let ps: PolicySet = serde_json::from_value(serde_json::json!({
            "id": "polset-1",
            "type": "policy-sets",
            "attributes": {
                "name": "production",
                "global": false,
                "kind": "sentinel",
                "policy-count": 2,
                "workspace-count": 1,
                "created-at": "2024-01-01T00:00:00Z"
            },
            "relationships": {
                "policies": {"data": [
                    {"id": "pol-1", "type": "policies"},
                    {"id": "pol-2", "type": "policies"}
                ]},
                "workspaces": {"data": [{"id": "ws-1", "type": "workspaces"}]}
            }
        }))
        .unwrap();

        assert_eq!(ps.name(), "production");
        assert_eq!(ps.policy_ids(), vec!["pol-1", "pol-2"]);
        assert_eq!(ps.workspace_ids(), vec!["ws-1"]);
        assert!(ps.project_ids().is_empty());
        assert!(!ps.is_versioned());
    }

    #[test]
    fn test_create_options_validation() {
        assert!(matches!(
            PolicySetCreateOptions::new("").valid(),
            Err(TfeError::Validation(ValidationError::RequiredName))
        ));
        assert!(matches!(
            PolicySetCreateOptions::new("prod set").valid(),
            Err(TfeError::Validation(ValidationError::InvalidName))
        ));
        assert!(PolicySetCreateOptions::new("prod").valid().is_ok());
    }

    #[test]
    fn test_create_options_skip_relationship_ids() {
        let opts = PolicySetCreateOptions {
            global: Some(true),
            policy_ids: vec!["pol-1".into()],
            ..PolicySetCreateOptions::new("all")
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({"name": "all", "global": true})
        );
    }
}
