//! Agent pool and agent token data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Agent pool data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct AgentPool {
    pub id: String,
    pub attributes: AgentPoolAttributes,
    pub relationships: Option<AgentPoolRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolAttributes {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Usable by every workspace in the organization
    pub organization_scoped: Option<bool>,
    #[serde(default)]
    pub agent_count: u32,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolRelationships {
    pub organization: Option<RelationshipData>,
    pub workspaces: Option<RelationshipList>,
    pub allowed_workspaces: Option<RelationshipList>,
}

impl TfeResource for AgentPool {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl AgentPool {
    pub fn is_organization_scoped(&self) -> bool {
        self.attributes.organization_scoped.unwrap_or(true)
    }

    pub fn allowed_workspace_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.allowed_workspaces.as_ref())
            .map(|w| w.ids())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentPoolListOptions {
    pub list: ListOptions,
    /// Partial name match (`q`)
    pub query: Option<String>,
    /// Only pools usable by this workspace name
    pub allowed_workspaces_name: Option<String>,
    pub include: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
    #[serde(skip)]
    pub allowed_workspace_ids: Vec<String>,
}

impl AgentPoolCreateOptions {
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
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
    /// Replaces the allowed workspaces when set
    #[serde(skip)]
    pub allowed_workspace_ids: Option<Vec<String>>,
}

impl AgentPoolUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if matches!(&self.name, Some(n) if n.is_empty()) {
            return Err(ValidationError::RequiredName.into());
        }
        Ok(())
    }
}

/// Token an agent uses to register with its pool
#[derive(Deserialize, Debug, Clone)]
pub struct AgentToken {
    pub id: String,
    pub attributes: AgentTokenAttributes,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AgentTokenAttributes {
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    /// Secret value, only returned on create
    pub token: Option<String>,
}

impl TfeResource for AgentToken {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct AgentTokenCreateOptions {
    pub description: String,
}

impl AgentTokenCreateOptions {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.description)) {
            return Err(ValidationError::RequiredDescription.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;

    #[test]
    fn test_agent_pool_deserialization() {
        let pool: AgentPool = serde_json::from_value(serde_json::json!({
            "id": "apool-1",
            "type": "agent-pools",
            "attributes": {
                "name": "on-prem",
                "created-at": "2024-05-01T08:00:00Z",
                "organization-scoped": false,
                "agent-count": 3
            },
            "relationships": {
                "allowed-workspaces": {"data": [{"id": "ws-1", "type": "workspaces"}]}
            }
        }))
        .unwrap();
        assert_eq!(pool.name(), "on-prem");
        assert!(!pool.is_organization_scoped());
        assert_eq!(pool.attributes.agent_count, 3);
        assert_eq!(pool.allowed_workspace_ids(), vec!["ws-1"]);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            AgentPoolCreateOptions::new("").valid(),
            Err(TfeError::Validation(ValidationError::RequiredName))
        ));
        assert!(matches!(
            AgentTokenCreateOptions::new("").valid(),
            Err(TfeError::Validation(ValidationError::RequiredDescription))
        ));
        assert!(AgentTokenCreateOptions::new("ci runner").valid().is_ok());
    }

    #[test]
    fn test_token_only_on_create() {
        let token: AgentToken = serde_json::from_value(serde_json::json!({
            "id": "at-1",
            "type": "authentication-tokens",
            "attributes": {"description": "ci", "token": "secret"}
        }))
        .unwrap();
        assert_eq!(token.attributes.token.as_deref(), Some("secret"));
        assert_eq!(token.name(), "ci");
    }
}
