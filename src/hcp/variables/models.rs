//! Variable data models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValidationError};
use crate::hcp::jsonapi::RelationshipData;

/// Where a variable is made available
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    /// Input variable for the Terraform configuration
    Terraform,
    /// Shell environment variable
    Env,
    /// Parameter for a policy set
    PolicySet,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryType::Terraform => "terraform",
            CategoryType::Env => "env",
            CategoryType::PolicySet => "policy-set",
        };
        write!(f, "{}", s)
    }
}

/// Variable data from TFE API
///
/// Shared by workspace variables and variable set variables.
#[derive(Deserialize, Debug, Clone)]
pub struct Variable {
    pub id: String,
    pub attributes: VariableAttributes,
    pub relationships: Option<VariableRelationships>,
}

impl Variable {
    pub fn key(&self) -> &str {
        &self.attributes.key
    }

    /// Value, `None` for sensitive variables
    pub fn value(&self) -> Option<&str> {
        self.attributes.value.as_deref()
    }

    pub fn is_sensitive(&self) -> bool {
        self.attributes.sensitive
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.id())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariableAttributes {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: CategoryType,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "version-id")]
    pub version_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariableRelationships {
    pub workspace: Option<RelationshipData>,
    #[serde(rename = "configurable")]
    pub configurable: Option<RelationshipData>,
    #[serde(rename = "var-set")]
    pub variable_set: Option<RelationshipData>,
}

/// Options for creating a variable
#[derive(Serialize, Debug, Clone)]
pub struct VariableCreateOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: CategoryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

impl VariableCreateOptions {
    pub fn new(key: impl Into<String>, value: impl Into<String>, category: CategoryType) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            description: None,
            category,
            hcl: None,
            sensitive: None,
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(ValidationError::RequiredKey.into());
        }
        Ok(())
    }
}

/// Options for updating a variable; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

impl VariableUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if matches!(self.key.as_deref(), Some("")) {
            return Err(ValidationError::RequiredKey.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_value(CategoryType::PolicySet).unwrap(),
            "policy-set"
        );
        assert_eq!(CategoryType::Env.to_string(), "env");
        let c: CategoryType = serde_json::from_str("\"terraform\"").unwrap();
        assert_eq!(c, CategoryType::Terraform);
    }

    #[test]
    fn test_sensitive_variable_has_no_value() {
        let v: Variable = serde_json::from_value(serde_json::json!({
            "id": "var-1",
            "type": "vars",
            "attributes": {
                "key": "secret",
                "value": null,
                "category": "env",
                "sensitive": true
            },
            "relationships": {
                "configurable": {"data": {"id": "ws-1", "type": "workspaces"}},
                "workspace": {"data": {"id": "ws-1", "type": "workspaces"}}
            }
        }))
        .unwrap();
        assert!(v.is_sensitive());
        assert!(v.value().is_none());
        assert!(!v.attributes.hcl);
        assert_eq!(v.workspace_id(), Some("ws-1"));
    }

    #[test]
    fn test_create_requires_key() {
        let opts = VariableCreateOptions::new("", "x", CategoryType::Terraform);
        assert!(matches!(
            opts.valid(),
            Err(TfeError::Validation(ValidationError::RequiredKey))
        ));
        assert!(VariableCreateOptions::new("region", "eu", CategoryType::Terraform)
            .valid()
            .is_ok());
    }

    #[test]
    fn test_update_rejects_empty_key() {
        let opts = VariableUpdateOptions {
            key: Some(String::new()),
            ..Default::default()
        };
        assert!(opts.valid().is_err());
        assert!(VariableUpdateOptions::default().valid().is_ok());
    }
}
