//! Organization tag API operations

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RelationshipList;
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{OrganizationTagsListOptions, Tag};

/// Organization tags service
pub struct OrganizationTags<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn organization_tags(&self) -> OrganizationTags<'_> {
        OrganizationTags { client: self }
    }
}

impl OrganizationTags<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &OrganizationTagsListOptions,
    ) -> Result<ResourceList<Tag>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("q", options.query.as_deref())
            .push_opt(
                "filter[exclude][taggable][id]",
                options.exclude_taggable_id.as_deref(),
            );
        let path = format!("/{}/{}/tags", api::ORGANIZATIONS, organization);
        self.client.list_page(&query.apply(&path)).await
    }

    /// Delete tags from the organization (and every workspace carrying them)
    pub async fn delete(&self, organization: &str, tag_ids: &[String]) -> Result<()> {
        require_org(organization)?;
        if tag_ids.is_empty() {
            return Err(ValidationError::RequiredTags.into());
        }
        for id in tag_ids {
            require_id(id, ValidationError::InvalidTagId)?;
        }
        let body = RelationshipList::of("tags", tag_ids);
        let path = format!("/{}/{}/tags", api::ORGANIZATIONS, organization);
        self.client.delete_with_body(&path, &body).await
    }

    /// Attach an existing tag to workspaces
    pub async fn add_workspaces(&self, tag_id: &str, workspace_ids: &[String]) -> Result<()> {
        require_id(tag_id, ValidationError::InvalidTagId)?;
        if workspace_ids.is_empty() {
            return Err(ValidationError::RequiredWorkspacesList.into());
        }
        for id in workspace_ids {
            require_id(id, ValidationError::InvalidWorkspaceId)?;
        }
        let body = RelationshipList::of(api::WORKSPACES, workspace_ids);
        self.client
            .post_body(&format!("/tags/{}/relationships/workspaces", tag_id), &body)
            .await
    }
}
