//! Team API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{Document, RelationshipList, RequestDocument};
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::users::User;
use crate::hcp::TfeClient;

use super::models::{Team, TeamCreateOptions, TeamListOptions, TeamMemberOptions, TeamUpdateOptions};

/// Teams service
pub struct Teams<'a> {
    client: &'a TfeClient,
}

/// Team membership service
pub struct TeamMembers<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn teams(&self) -> Teams<'_> {
        Teams { client: self }
    }

    pub fn team_members(&self) -> TeamMembers<'_> {
        TeamMembers { client: self }
    }
}

fn team_path(team_id: &str) -> String {
    format!("/{}/{}", api::TEAMS, team_id)
}

impl Teams<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &TeamListOptions,
    ) -> Result<ResourceList<Team>> {
        require_org(organization)?;

        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_list("filter[names]", &options.names)
            .push_opt("q", options.query.as_deref())
            .include(&options.include);

        let path = format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::TEAMS);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, team_id: &str) -> Result<Team> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        self.client.read_data(&team_path(team_id)).await
    }

    /// Find a team by exact name
    pub async fn read_by_name(&self, organization: &str, name: &str) -> Result<Team> {
        if name.is_empty() {
            return Err(ValidationError::RequiredName.into());
        }
        let options = TeamListOptions {
            names: vec![name.to_string()],
            ..Default::default()
        };
        let page = self.list(organization, &options).await?;
        debug!(
            "Team lookup by name '{}' in '{}' returned {} results",
            name,
            organization,
            page.len()
        );
        page.items
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or(TfeError::NotFound)
    }

    pub async fn create(&self, organization: &str, options: &TeamCreateOptions) -> Result<Team> {
        require_org(organization)?;
        options.valid()?;
        let body = RequestDocument::new("teams", options);
        let path = format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::TEAMS);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(&self, team_id: &str, options: &TeamUpdateOptions) -> Result<Team> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        let body = RequestDocument::new("teams", options);
        self.client.update_data(&team_path(team_id), &body).await
    }

    pub async fn delete(&self, team_id: &str) -> Result<()> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        self.client.delete_path(&team_path(team_id)).await
    }
}

impl TeamMembers<'_> {
    /// Users in a team (read from the team's `included` users)
    pub async fn list_users(&self, team_id: &str) -> Result<Vec<User>> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        let doc: Document<Team> = self
            .client
            .read_document(&format!("{}?include=users", team_path(team_id)))
            .await?;

        let users = doc
            .included
            .into_iter()
            .filter(|v| v.get("type").and_then(|t| t.as_str()) == Some("users"))
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<User>, _>>()?;
        Ok(users)
    }

    pub async fn add(&self, team_id: &str, options: &TeamMemberOptions) -> Result<()> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        options.valid()?;
        let (path, body) = Self::request(team_id, options);
        debug!("Adding members to team {}", team_id);
        self.client.post_body(&path, &body).await
    }

    pub async fn remove(&self, team_id: &str, options: &TeamMemberOptions) -> Result<()> {
        require_id(team_id, ValidationError::InvalidTeamId)?;
        options.valid()?;
        let (path, body) = Self::request(team_id, options);
        debug!("Removing members from team {}", team_id);
        self.client.delete_with_body(&path, &body).await
    }

    fn request(team_id: &str, options: &TeamMemberOptions) -> (String, RelationshipList) {
        if options.usernames.is_empty() {
            (
                format!("{}/relationships/organization-memberships", team_path(team_id)),
                RelationshipList::of(
                    "organization-memberships",
                    &options.organization_membership_ids,
                ),
            )
        } else {
            (
                format!("{}/relationships/users", team_path(team_id)),
                RelationshipList::of("users", &options.usernames),
            )
        }
    }
}
