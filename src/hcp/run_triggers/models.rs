//! Run trigger data models

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string_id;
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Link that queues a run in one workspace when another applies
#[derive(Deserialize, Debug, Clone)]
pub struct RunTrigger {
    pub id: String,
    pub attributes: RunTriggerAttributes,
    pub relationships: Option<RunTriggerRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RunTriggerAttributes {
    pub created_at: Option<DateTime<Utc>>,
    /// Name of the upstream workspace
    pub sourceable_name: Option<String>,
    /// Name of the downstream workspace
    pub workspace_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunTriggerRelationships {
    pub workspace: Option<RelationshipData>,
    pub sourceable: Option<RelationshipData>,
}

impl TfeResource for RunTrigger {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes.sourceable_name.as_deref().unwrap_or(&self.id)
    }
}

impl RunTrigger {
    pub fn sourceable_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.sourceable.as_ref())
            .and_then(|s| s.id())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.id())
    }
}

/// Direction of the triggers to list, relative to the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTriggerType {
    /// Workspaces that trigger this one
    Inbound,
    /// Workspaces this one triggers
    Outbound,
}

impl fmt::Display for RunTriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunTriggerType::Inbound => write!(f, "inbound"),
            RunTriggerType::Outbound => write!(f, "outbound"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunTriggerListOptions {
    pub list: ListOptions,
    /// Required by the API
    pub trigger_type: Option<RunTriggerType>,
    /// "workspace" and/or "sourceable"; inbound only
    pub include: Vec<String>,
}

impl RunTriggerListOptions {
    pub fn new(trigger_type: RunTriggerType) -> Self {
        Self {
            trigger_type: Some(trigger_type),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        match self.trigger_type {
            None => Err(ValidationError::InvalidRunTriggerType.into()),
            Some(RunTriggerType::Outbound) if !self.include.is_empty() => {
                Err(ValidationError::InvalidRunTriggerType.into())
            }
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunTriggerCreateOptions {
    /// Upstream workspace ID
    pub sourceable_id: String,
}

impl RunTriggerCreateOptions {
    pub fn new(sourceable_id: impl Into<String>) -> Self {
        Self {
            sourceable_id: sourceable_id.into(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string_id(Some(&self.sourceable_id)) {
            return Err(ValidationError::RequiredSourceable.into());
        }
        Ok(())
    }
}
