//! Organization membership API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{Document, RequestDocument};
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{
    OrganizationMembership, OrganizationMembershipCreateOptions,
    OrganizationMembershipListOptions,
};

/// Organization memberships service
pub struct OrganizationMemberships<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn organization_memberships(&self) -> OrganizationMemberships<'_> {
        OrganizationMemberships { client: self }
    }
}

impl OrganizationMemberships<'_> {
    /// List memberships (members and pending invitations) of an organization
    pub async fn list(
        &self,
        organization: &str,
        options: &OrganizationMembershipListOptions,
    ) -> Result<ResourceList<OrganizationMembership>> {
        require_org(organization)?;
        options.valid()?;

        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_list("filter[email]", &options.emails)
            .push_opt("filter[status]", options.status)
            .push_opt("q", options.query.as_deref())
            .include(&options.include);

        let path = format!(
            "/{}/{}/organization-memberships",
            api::ORGANIZATIONS,
            organization
        );
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, membership_id: &str) -> Result<OrganizationMembership> {
        require_id(membership_id, ValidationError::InvalidMembershipId)?;
        self.client
            .read_data(&format!("/organization-memberships/{}", membership_id))
            .await
    }

    /// Read a membership with its user and teams included
    pub async fn read_with_user(
        &self,
        membership_id: &str,
    ) -> Result<Document<OrganizationMembership>> {
        require_id(membership_id, ValidationError::InvalidMembershipId)?;
        self.client
            .read_document(&format!(
                "/organization-memberships/{}?include=user,teams",
                membership_id
            ))
            .await
    }

    /// Invite a user by email
    pub async fn create(
        &self,
        organization: &str,
        options: &OrganizationMembershipCreateOptions,
    ) -> Result<OrganizationMembership> {
        require_org(organization)?;
        options.valid()?;

        debug!("Inviting {} to organization {}", options.email, organization);

        let mut body = RequestDocument::new("organization-memberships", options);
        if !options.team_ids.is_empty() {
            body = body.relate_many("teams", "teams", &options.team_ids);
        }

        let path = format!(
            "/{}/{}/organization-memberships",
            api::ORGANIZATIONS,
            organization
        );
        self.client.create_data(&path, &body).await
    }

    /// Remove a member (or revoke an invitation)
    pub async fn delete(&self, membership_id: &str) -> Result<()> {
        require_id(membership_id, ValidationError::InvalidMembershipId)?;
        debug!("Deleting organization membership {}", membership_id);
        self.client
            .delete_path(&format!("/organization-memberships/{}", membership_id))
            .await
    }
}
