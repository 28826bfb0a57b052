//! Organization data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::{valid_email, valid_string_id};
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Organization data from TFE API
///
/// The `id` of an organization is its name.
#[derive(Deserialize, Debug, Clone)]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub attributes: OrganizationAttributes,
    pub relationships: Option<OrganizationRelationships>,
}

/// Organization attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrganizationAttributes {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "external-id")]
    pub external_id: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "saml-enabled")]
    pub saml_enabled: Option<bool>,
    #[serde(rename = "session-timeout")]
    pub session_timeout: Option<u32>,
    #[serde(rename = "session-remember")]
    pub session_remember: Option<u32>,
    #[serde(rename = "collaborator-auth-policy")]
    pub collaborator_auth_policy: Option<String>,
    #[serde(rename = "cost-estimation-enabled")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(rename = "default-execution-mode")]
    pub default_execution_mode: Option<String>,
    #[serde(rename = "assessments-enforced")]
    pub assessments_enforced: Option<bool>,
    #[serde(rename = "allow-force-delete-workspaces")]
    pub allow_force_delete_workspaces: Option<bool>,
    #[serde(rename = "two-factor-conformant")]
    pub two_factor_conformant: Option<bool>,
    #[serde(rename = "trial-expires-at")]
    pub trial_expires_at: Option<DateTime<Utc>>,
    pub permissions: Option<OrganizationPermissions>,
}

/// What the current token may do in the organization
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrganizationPermissions {
    #[serde(rename = "can-update")]
    pub can_update: Option<bool>,
    #[serde(rename = "can-destroy")]
    pub can_destroy: Option<bool>,
    #[serde(rename = "can-create-team")]
    pub can_create_team: Option<bool>,
    #[serde(rename = "can-create-workspace")]
    pub can_create_workspace: Option<bool>,
    #[serde(rename = "can-manage-users")]
    pub can_manage_users: Option<bool>,
}

/// Organization relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationRelationships {
    #[serde(rename = "default-project")]
    pub default_project: Option<RelationshipData>,
}

impl TfeResource for Organization {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes.name.as_deref().unwrap_or(&self.id)
    }

    fn matches(&self, input: &str) -> bool {
        self.id == input || self.external_id() == input
    }
}

impl Organization {
    pub fn email(&self) -> &str {
        self.attributes.email.as_deref().unwrap_or("")
    }

    pub fn external_id(&self) -> &str {
        self.attributes.external_id.as_deref().unwrap_or("")
    }

    pub fn saml_enabled(&self) -> bool {
        self.attributes.saml_enabled.unwrap_or(false)
    }

    /// Get default project ID from relationships
    pub fn default_project_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.default_project.as_ref())
            .and_then(|dp| dp.id())
    }
}

/// Query options for listing organizations
#[derive(Default, Debug, Clone)]
pub struct OrganizationListOptions {
    pub list: ListOptions,
    /// Search by name or email (`q`)
    pub query: Option<String>,
}

/// Options for creating an organization
#[derive(Serialize, Debug, Clone, Default)]
pub struct OrganizationCreateOptions {
    pub name: String,
    pub email: String,
    #[serde(rename = "session-timeout", skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<u32>,
    #[serde(rename = "session-remember", skip_serializing_if = "Option::is_none")]
    pub session_remember: Option<u32>,
    #[serde(
        rename = "collaborator-auth-policy",
        skip_serializing_if = "Option::is_none"
    )]
    pub collaborator_auth_policy: Option<String>,
    #[serde(
        rename = "cost-estimation-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(
        rename = "default-execution-mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_execution_mode: Option<String>,
    #[serde(rename = "assessments-enforced", skip_serializing_if = "Option::is_none")]
    pub assessments_enforced: Option<bool>,
    #[serde(
        rename = "allow-force-delete-workspaces",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_force_delete_workspaces: Option<bool>,
}

impl OrganizationCreateOptions {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
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
        if self.email.is_empty() {
            return Err(ValidationError::RequiredEmail.into());
        }
        if !valid_email(&self.email) {
            return Err(TfeError::Validation(ValidationError::InvalidEmail));
        }
        Ok(())
    }
}

/// Options for updating an organization; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct OrganizationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "session-timeout", skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<u32>,
    #[serde(rename = "session-remember", skip_serializing_if = "Option::is_none")]
    pub session_remember: Option<u32>,
    #[serde(
        rename = "collaborator-auth-policy",
        skip_serializing_if = "Option::is_none"
    )]
    pub collaborator_auth_policy: Option<String>,
    #[serde(
        rename = "cost-estimation-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(
        rename = "default-execution-mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_execution_mode: Option<String>,
    #[serde(rename = "assessments-enforced", skip_serializing_if = "Option::is_none")]
    pub assessments_enforced: Option<bool>,
    #[serde(
        rename = "allow-force-delete-workspaces",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_force_delete_workspaces: Option<bool>,
}

impl OrganizationUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !valid_string_id(Some(name)) {
                return Err(ValidationError::InvalidName.into());
            }
        }
        if let Some(email) = &self.email {
            if !valid_email(email) {
                return Err(ValidationError::InvalidEmail.into());
            }
        }
        Ok(())
    }
}

/// Run capacity of an organization
#[derive(Deserialize, Debug, Clone)]
pub struct Capacity {
    pub id: String,
    pub attributes: CapacityAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CapacityAttributes {
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub running: u32,
}

/// Feature entitlements of an organization
#[derive(Deserialize, Debug, Clone)]
pub struct Entitlements {
    pub id: String,
    #[serde(default)]
    pub attributes: EntitlementAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct EntitlementAttributes {
    pub agents: bool,
    pub audit_logging: bool,
    pub cost_estimation: bool,
    pub operations: bool,
    pub private_module_registry: bool,
    pub run_tasks: bool,
    pub sentinel: bool,
    pub sso: bool,
    pub state_storage: bool,
    pub teams: bool,
    pub vcs_integrations: bool,
}

/// Organization API token
#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationToken {
    pub id: String,
    pub attributes: OrganizationTokenAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrganizationTokenAttributes {
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[serde(rename = "last-used-at")]
    pub last_used_at: Option<DateTime<Utc>>,
    /// Only present in the response to `create`
    pub token: Option<String>,
    #[serde(rename = "expired-at")]
    pub expired_at: Option<DateTime<Utc>>,
}

/// Options for generating an organization token
#[derive(Serialize, Debug, Clone, Default)]
pub struct OrganizationTokenCreateOptions {
    #[serde(rename = "expired-at", skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
}
