//! Policy data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{valid_string, valid_string_id};
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Policy language
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Sentinel,
    Opa,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Sentinel => write!(f, "sentinel"),
            PolicyKind::Opa => write!(f, "opa"),
        }
    }
}

/// What a failing policy does to the run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EnforcementLevel {
    #[default]
    Advisory,
    SoftMandatory,
    HardMandatory,
    /// OPA only
    Mandatory,
}

/// Policy data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Policy {
    pub id: String,
    pub attributes: PolicyAttributes,
    pub relationships: Option<PolicyRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyAttributes {
    pub name: String,
    #[serde(default)]
    pub kind: PolicyKind,
    /// OPA query evaluated against the policy
    pub query: Option<String>,
    pub description: Option<String>,
    pub enforcement_level: Option<EnforcementLevel>,
    #[serde(default)]
    pub policy_set_count: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyRelationships {
    pub organization: Option<RelationshipData>,
    pub policy_sets: Option<RelationshipList>,
}

impl TfeResource for Policy {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Policy {
    pub fn kind(&self) -> PolicyKind {
        self.attributes.kind
    }

    pub fn policy_set_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.policy_sets.as_ref())
            .map(|p| p.ids())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicyListOptions {
    pub list: ListOptions,
    /// Partial name match (`search[name]`)
    pub search: Option<String>,
    pub kind: Option<PolicyKind>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyCreateOptions {
    pub name: String,
    pub kind: PolicyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enforcement_level: EnforcementLevel,
}

impl PolicyCreateOptions {
    pub fn new(name: impl Into<String>, kind: PolicyKind, enforcement_level: EnforcementLevel) -> Self {
        Self {
            name: name.into(),
            kind,
            enforcement_level,
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
        if self.kind == PolicyKind::Opa && !valid_string(self.query.as_deref()) {
            return Err(ValidationError::RequiredQuery.into());
        }
        Ok(())
    }
}

/// Name and kind are fixed after creation
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement_level: Option<EnforcementLevel>,
}
