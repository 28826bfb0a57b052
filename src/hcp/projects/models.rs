//! Project data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Project data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    pub id: String,
    pub attributes: ProjectAttributes,
    pub relationships: Option<ProjectRelationships>,
}

/// Project attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct ProjectAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "workspace-count")]
    pub workspace_count: Option<u32>,
    #[serde(rename = "team-count")]
    pub team_count: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectRelationships {
    pub organization: Option<RelationshipData>,
}

impl TfeResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Project {
    /// Get the project description
    pub fn description(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or("")
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.id())
    }
}

/// Query options for listing projects
#[derive(Default, Debug, Clone)]
pub struct ProjectListOptions {
    pub list: ListOptions,
    /// Exact project names (`filter[names]`)
    pub names: Vec<String>,
    /// Fuzzy name search (`q`)
    pub query: Option<String>,
}

/// Options for creating a project
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProjectCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.name)) {
            return Err(ValidationError::RequiredName.into());
        }
        Ok(())
    }
}

/// Options for updating a project
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProjectUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if matches!(&self.name, Some(n) if n.is_empty()) {
            return Err(ValidationError::InvalidName.into());
        }
        Ok(())
    }
}
