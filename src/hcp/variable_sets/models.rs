//! Variable set data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Variable set data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct VariableSet {
    pub id: String,
    pub attributes: VariableSetAttributes,
    #[serde(default)]
    pub relationships: VariableSetRelationships,
}

impl TfeResource for VariableSet {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl VariableSet {
    /// Whether the set applies to every workspace in the organization
    pub fn is_global(&self) -> bool {
        self.attributes.global
    }

    pub fn workspace_ids(&self) -> Vec<&str> {
        self.relationships.workspaces.ids()
    }

    pub fn project_ids(&self) -> Vec<&str> {
        self.relationships.projects.ids()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariableSetAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub global: bool,
    /// Priority sets override workspace-level variables
    #[serde(default)]
    pub priority: bool,
    #[serde(rename = "var-count", default)]
    pub var_count: u32,
    #[serde(rename = "workspace-count", default)]
    pub workspace_count: u32,
    #[serde(rename = "project-count", default)]
    pub project_count: u32,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct VariableSetRelationships {
    pub organization: Option<RelationshipData>,
    #[serde(default)]
    pub workspaces: RelationshipList,
    #[serde(default)]
    pub projects: RelationshipList,
    #[serde(default)]
    pub vars: RelationshipList,
}

/// Options for listing variable sets
#[derive(Debug, Clone, Default)]
pub struct VariableSetListOptions {
    pub list: ListOptions,
    /// Related resources to include: "workspaces", "projects", "vars"
    pub include: Vec<String>,
    /// Filter by name
    pub query: Option<String>,
}

/// Options for creating a variable set
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableSetCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
    /// Workspaces to apply the new set to
    #[serde(skip)]
    pub workspace_ids: Vec<String>,
    /// Projects to apply the new set to
    #[serde(skip)]
    pub project_ids: Vec<String>,
}

impl VariableSetCreateOptions {
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
        Ok(())
    }
}

/// Options for updating a variable set
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableSetUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
}

impl VariableSetUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if matches!(self.name.as_deref(), Some("")) {
            return Err(ValidationError::RequiredName.into());
        }
        Ok(())
    }
}
