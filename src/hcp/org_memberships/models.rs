//! Organization membership data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_email;
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;

/// Organization membership data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationMembership {
    pub id: String,
    #[serde(default)]
    pub attributes: OrganizationMembershipAttributes,
    pub relationships: Option<OrganizationMembershipRelationships>,
}

/// Organization membership attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrganizationMembershipAttributes {
    pub email: Option<String>,
    pub status: Option<MembershipStatus>,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Invitation state of a membership
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Invited,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Invited => write!(f, "invited"),
        }
    }
}

/// Organization membership relationships
#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationMembershipRelationships {
    pub user: Option<RelationshipData>,
    pub organization: Option<RelationshipData>,
    pub teams: Option<RelationshipList>,
}

impl OrganizationMembership {
    pub fn email(&self) -> &str {
        self.attributes.email.as_deref().unwrap_or("")
    }

    pub fn user_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.user.as_ref())
            .and_then(|u| u.id())
    }

    /// IDs of teams the member belongs to
    pub fn team_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.teams.as_ref())
            .map(|t| t.ids())
            .unwrap_or_default()
    }
}

/// Query options for listing memberships
#[derive(Default, Debug, Clone)]
pub struct OrganizationMembershipListOptions {
    pub list: ListOptions,
    /// Exact email matches (`filter[email]`)
    pub emails: Vec<String>,
    /// Filter by invitation state
    pub status: Option<MembershipStatus>,
    /// Search by user name or email (`q`)
    pub query: Option<String>,
    /// Related resources to include, e.g. "user", "teams"
    pub include: Vec<String>,
}

impl OrganizationMembershipListOptions {
    pub fn valid(&self) -> Result<()> {
        if self.emails.iter().any(|e| !valid_email(e)) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }
}

/// Options for inviting a user to an organization
#[derive(Serialize, Debug, Clone, Default)]
pub struct OrganizationMembershipCreateOptions {
    pub email: String,
    /// Teams to add the user to once they accept
    #[serde(skip)]
    pub team_ids: Vec<String>,
}

impl OrganizationMembershipCreateOptions {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            team_ids: Vec::new(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.email.is_empty() {
            return Err(ValidationError::RequiredEmail.into());
        }
        if !valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }
}
