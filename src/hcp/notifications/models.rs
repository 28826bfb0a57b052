//! Notification configuration data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::traits::TfeResource;

/// Run events a notification can subscribe to
pub mod triggers {
    pub const RUN_CREATED: &str = "run:created";
    pub const RUN_PLANNING: &str = "run:planning";
    pub const RUN_NEEDS_ATTENTION: &str = "run:needs_attention";
    pub const RUN_APPLYING: &str = "run:applying";
    pub const RUN_COMPLETED: &str = "run:completed";
    pub const RUN_ERRORED: &str = "run:errored";
    pub const ASSESSMENT_DRIFTED: &str = "assessment:drifted";
    pub const ASSESSMENT_FAILED: &str = "assessment:failed";
    pub const ASSESSMENT_CHECK_FAILURE: &str = "assessment:check_failure";
    pub const WORKSPACE_AUTO_DESTROY_REMINDER: &str = "workspace:auto_destroy_reminder";
    pub const WORKSPACE_AUTO_DESTROY_RUN_RESULTS: &str = "workspace:auto_destroy_run_results";

    pub const ALL: &[&str] = &[
        RUN_CREATED,
        RUN_PLANNING,
        RUN_NEEDS_ATTENTION,
        RUN_APPLYING,
        RUN_COMPLETED,
        RUN_ERRORED,
        ASSESSMENT_DRIFTED,
        ASSESSMENT_FAILED,
        ASSESSMENT_CHECK_FAILURE,
        WORKSPACE_AUTO_DESTROY_REMINDER,
        WORKSPACE_AUTO_DESTROY_RUN_RESULTS,
    ];
}

/// Where notifications are delivered
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationType {
    Generic,
    Email,
    Slack,
    MicrosoftTeams,
}

impl DestinationType {
    /// Webhook destinations need a URL
    pub fn requires_url(self) -> bool {
        !matches!(self, DestinationType::Email)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationConfiguration {
    pub id: String,
    pub attributes: NotificationConfigurationAttributes,
    pub relationships: Option<NotificationConfigurationRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct NotificationConfigurationAttributes {
    pub name: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub enabled: bool,
    pub url: Option<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
    #[serde(default)]
    pub delivery_responses: Vec<DeliveryResponse>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of one delivery attempt
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeliveryResponse {
    pub url: Option<String>,
    pub body: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub successful: serde_json::Value,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NotificationConfigurationRelationships {
    pub subscribable: Option<RelationshipData>,
    pub users: Option<RelationshipList>,
}

impl TfeResource for NotificationConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl NotificationConfiguration {
    pub fn is_enabled(&self) -> bool {
        self.attributes.enabled
    }

    pub fn subscribable_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.subscribable.as_ref())
            .and_then(|s| s.id())
    }
}

fn valid_triggers(list: &[String]) -> Result<()> {
    if list.iter().any(|t| !triggers::ALL.contains(&t.as_str())) {
        return Err(ValidationError::InvalidNotificationTrigger.into());
    }
    Ok(())
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct NotificationConfigurationCreateOptions {
    pub name: String,
    pub destination_type: DestinationType,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HMAC signing secret for generic webhooks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    /// TFE only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<String>,
    #[serde(skip)]
    pub email_user_ids: Vec<String>,
}

impl NotificationConfigurationCreateOptions {
    pub fn new(name: impl Into<String>, destination_type: DestinationType, enabled: bool) -> Self {
        Self {
            name: name.into(),
            destination_type,
            enabled,
            url: None,
            token: None,
            triggers: Vec::new(),
            email_addresses: Vec::new(),
            email_user_ids: Vec::new(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.name)) {
            return Err(ValidationError::RequiredName.into());
        }
        if self.destination_type.requires_url() && !valid_string(self.url.as_deref()) {
            return Err(ValidationError::RequiredUrl.into());
        }
        valid_triggers(&self.triggers)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct NotificationConfigurationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<Vec<String>>,
    #[serde(skip)]
    pub email_user_ids: Option<Vec<String>>,
}

impl NotificationConfigurationUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if matches!(&self.name, Some(n) if n.is_empty()) {
            return Err(ValidationError::RequiredName.into());
        }
        if let Some(list) = &self.triggers {
            valid_triggers(list)?;
        }
        Ok(())
    }
}
