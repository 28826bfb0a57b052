//! Team data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{valid_string, valid_string_id};
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Team data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub attributes: TeamAttributes,
    pub relationships: Option<TeamRelationships>,
}

/// Team attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamAttributes {
    pub name: Option<String>,
    #[serde(rename = "sso-team-id")]
    pub sso_team_id: Option<String>,
    #[serde(rename = "users-count")]
    pub users_count: Option<u32>,
    pub visibility: Option<String>,
    #[serde(rename = "allow-member-token-management")]
    pub allow_member_token_management: Option<bool>,
    pub permissions: Option<TeamPermissions>,
    #[serde(rename = "organization-access")]
    pub organization_access: Option<OrganizationAccess>,
}

/// Team permissions
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamPermissions {
    #[serde(rename = "can-update-membership")]
    pub can_update_membership: Option<bool>,
    #[serde(rename = "can-destroy")]
    pub can_destroy: Option<bool>,
    #[serde(rename = "can-update-organization-access")]
    pub can_update_organization_access: Option<bool>,
    #[serde(rename = "can-update-api-token")]
    pub can_update_api_token: Option<bool>,
    #[serde(rename = "can-update-visibility")]
    pub can_update_visibility: Option<bool>,
}

/// Organization-level access permissions for the team
///
/// Used both in responses and in create/update options.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_policies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_policy_overrides: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_run_tasks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_workspaces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_vcs_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_agent_pools: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_workspaces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_membership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_teams: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_organization_access: Option<bool>,
}

/// Team relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct TeamRelationships {
    pub users: Option<RelationshipList>,
    #[serde(rename = "organization-memberships")]
    pub organization_memberships: Option<RelationshipList>,
}

impl Team {
    /// Get team name from attributes
    pub fn name(&self) -> &str {
        self.attributes.name.as_deref().unwrap_or("")
    }

    pub fn users_count(&self) -> u32 {
        self.attributes.users_count.unwrap_or(0)
    }

    /// Get visibility from attributes
    pub fn visibility(&self) -> &str {
        self.attributes.visibility.as_deref().unwrap_or("secret")
    }

    /// Check if team has manage-workspaces permission
    pub fn can_manage_workspaces(&self) -> bool {
        self.attributes
            .organization_access
            .as_ref()
            .and_then(|oa| oa.manage_workspaces)
            .unwrap_or(false)
    }

    /// IDs of member users, when the relationship is present
    pub fn user_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.users.as_ref())
            .map(|u| u.ids())
            .unwrap_or_default()
    }
}

impl TfeResource for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.name()
    }
}

/// Query options for listing teams
#[derive(Default, Debug, Clone)]
pub struct TeamListOptions {
    pub list: ListOptions,
    /// Exact team names (`filter[names]`)
    pub names: Vec<String>,
    /// Search by name (`q`)
    pub query: Option<String>,
    pub include: Vec<String>,
}

/// Options for creating a team
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamCreateOptions {
    pub name: String,
    #[serde(rename = "sso-team-id", skip_serializing_if = "Option::is_none")]
    pub sso_team_id: Option<String>,
    #[serde(rename = "organization-access", skip_serializing_if = "Option::is_none")]
    pub organization_access: Option<OrganizationAccess>,
    /// "secret" or "organization"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(
        rename = "allow-member-token-management",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_member_token_management: Option<bool>,
}

impl TeamCreateOptions {
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

/// Options for updating a team
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "sso-team-id", skip_serializing_if = "Option::is_none")]
    pub sso_team_id: Option<String>,
    #[serde(rename = "organization-access", skip_serializing_if = "Option::is_none")]
    pub organization_access: Option<OrganizationAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(
        rename = "allow-member-token-management",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_member_token_management: Option<bool>,
}

/// Members to add to or remove from a team
///
/// Exactly one of the two lists must be set.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberOptions {
    pub usernames: Vec<String>,
    pub organization_membership_ids: Vec<String>,
}

impl TeamMemberOptions {
    pub fn usernames<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: names.into_iter().map(Into::into).collect(),
            organization_membership_ids: Vec::new(),
        }
    }

    pub fn memberships<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: Vec::new(),
            organization_membership_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        // Either list, not both
        if self.usernames.is_empty() == self.organization_membership_ids.is_empty() {
            return Err(ValidationError::RequiredUsernames.into());
        }
        if self.usernames.iter().any(|u| u.is_empty())
            || self.organization_membership_ids.iter().any(|m| m.is_empty())
        {
            return Err(ValidationError::RequiredUsernames.into());
        }
        Ok(())
    }
}

/// Workspace access levels granted to a team
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Read,
    Plan,
    Write,
    Admin,
    Custom,
}

/// Team access binding to a workspace
#[derive(Deserialize, Debug, Clone)]
pub struct TeamAccess {
    pub id: String,
    pub attributes: TeamAccessAttributes,
    pub relationships: Option<TeamAccessRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamAccessAttributes {
    pub access: AccessType,
    pub runs: Option<String>,
    pub variables: Option<String>,
    #[serde(rename = "state-versions")]
    pub state_versions: Option<String>,
    #[serde(rename = "sentinel-mocks")]
    pub sentinel_mocks: Option<String>,
    #[serde(rename = "workspace-locking")]
    pub workspace_locking: Option<bool>,
    #[serde(rename = "run-tasks")]
    pub run_tasks: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamAccessRelationships {
    pub team: Option<RelationshipData>,
    pub workspace: Option<RelationshipData>,
}

impl TeamAccess {
    pub fn team_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.team.as_ref())
            .and_then(|t| t.id())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.id())
    }
}

/// Custom permission fields shared by add and update
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CustomWorkspacePermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_versions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_mocks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_locking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_tasks: Option<bool>,
}

/// Options for granting a team access to a workspace
#[derive(Serialize, Debug, Clone)]
pub struct TeamAccessAddOptions {
    pub access: Option<AccessType>,
    #[serde(flatten)]
    pub custom: CustomWorkspacePermissions,
    #[serde(skip)]
    pub team_id: String,
    #[serde(skip)]
    pub workspace_id: String,
}

impl TeamAccessAddOptions {
    pub fn new(access: AccessType, team_id: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            access: Some(access),
            custom: CustomWorkspacePermissions::default(),
            team_id: team_id.into(),
            workspace_id: workspace_id.into(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.access.is_none() {
            return Err(ValidationError::RequiredAccess.into());
        }
        if !valid_string_id(Some(&self.team_id)) {
            return Err(ValidationError::InvalidTeamId.into());
        }
        if !valid_string_id(Some(&self.workspace_id)) {
            return Err(ValidationError::InvalidWorkspaceId.into());
        }
        Ok(())
    }
}

/// Options for changing a team's workspace access
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamAccessUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessType>,
    #[serde(flatten)]
    pub custom: CustomWorkspacePermissions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;

    #[test]
    fn test_deserialize_team() {
        let json = r#"{
            "id": "team-6p5jTwJQXwqZBncC",
            "type": "teams",
            "attributes": {
                "name": "owners",
                "users-count": 3,
                "visibility": "organization",
                "organization-access": {"manage-workspaces": true}
            },
            "relationships": {
                "users": {"data": [{"id": "user-1", "type": "users"}]}
            }
        }"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.name(), "owners");
        assert_eq!(team.users_count(), 3);
        assert_eq!(team.visibility(), "organization");
        assert!(team.can_manage_workspaces());
        assert_eq!(team.user_ids(), vec!["user-1"]);
    }

    #[test]
    fn test_team_defaults() {
        let team: Team = serde_json::from_str(r#"{"id": "team-1"}"#).unwrap();
        assert_eq!(team.name(), "");
        assert_eq!(team.visibility(), "secret");
        assert!(!team.can_manage_workspaces());
    }

    #[test]
    fn test_member_options_validation() {
        assert!(TeamMemberOptions::usernames(["alice"]).valid().is_ok());
        assert!(TeamMemberOptions::memberships(["ou-1"]).valid().is_ok());
        assert!(matches!(
            TeamMemberOptions::default().valid(),
            Err(TfeError::Validation(ValidationError::RequiredUsernames))
        ));

        let both = TeamMemberOptions {
            usernames: vec!["alice".to_string()],
            organization_membership_ids: vec!["ou-1".to_string()],
        };
        assert!(both.valid().is_err());
    }

    #[test]
    fn test_team_access_options() {
        let mut opts = TeamAccessAddOptions::new(AccessType::Custom, "team-1", "ws-1");
        opts.custom.runs = Some("apply".to_string());
        opts.custom.workspace_locking = Some(true);
        assert!(opts.valid().is_ok());
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({"access": "custom", "runs": "apply", "workspace-locking": true})
        );

        opts.access = None;
        assert!(matches!(
            opts.valid(),
            Err(TfeError::Validation(ValidationError::RequiredAccess))
        ));
    }
}
