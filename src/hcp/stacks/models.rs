//! Stack data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{valid_string, valid_string_id};
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Stack data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Stack {
    pub id: String,
    pub attributes: StackAttributes,
    pub relationships: Option<StackRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StackAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub deployment_names: Vec<String>,
    pub vcs_repo: Option<StackVcsRepo>,
    #[serde(default)]
    pub speculative_enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository a stack reads its configuration from
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StackVcsRepo {
    /// `owner/repo`
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_app_installation_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StackRelationships {
    pub project: Option<RelationshipData>,
    pub latest_stack_configuration: Option<RelationshipData>,
}

impl TfeResource for Stack {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Stack {
    pub fn project_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.project.as_ref())
            .and_then(|p| p.id())
    }

    pub fn latest_configuration_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.latest_stack_configuration.as_ref())
            .and_then(|c| c.id())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StackListOptions {
    pub list: ListOptions,
    pub project_id: Option<String>,
    /// Partial name match (`search[name]`)
    pub search: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StackCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub vcs_repo: StackVcsRepo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative_enabled: Option<bool>,
    #[serde(skip)]
    pub project_id: String,
}

impl StackCreateOptions {
    pub fn new(
        name: impl Into<String>,
        project_id: impl Into<String>,
        vcs_repo: StackVcsRepo,
    ) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            vcs_repo,
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.name)) {
            return Err(ValidationError::RequiredName.into());
        }
        if !valid_string_id(Some(&self.project_id)) {
            return Err(ValidationError::RequiredProject.into());
        }
        if !valid_string(Some(&self.vcs_repo.identifier)) {
            return Err(ValidationError::RequiredVcsRepo.into());
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StackUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<StackVcsRepo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative_enabled: Option<bool>,
}
