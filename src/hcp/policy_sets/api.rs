//! Policy set API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::{RelationshipList, RequestDocument};
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{
    PolicySet, PolicySetCreateOptions, PolicySetListOptions, PolicySetUpdateOptions,
};

/// Policy sets service
pub struct PolicySets<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn policy_sets(&self) -> PolicySets<'_> {
        PolicySets { client: self }
    }
}

fn policy_set_path(policy_set_id: &str) -> Result<String> {
    require_id(policy_set_id, ValidationError::InvalidPolicySetId)?;
    Ok(format!("/policy-sets/{}", policy_set_id))
}

fn relationship_body(
    rel_type: &str,
    ids: &[String],
    empty: ValidationError,
) -> Result<RelationshipList> {
    if ids.is_empty() {
        return Err(empty.into());
    }
    Ok(RelationshipList::of(rel_type, ids))
}

impl PolicySets<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &PolicySetListOptions,
    ) -> Result<ResourceList<PolicySet>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("search[name]", options.search.as_deref())
            .push_opt("filter[kind]", options.kind)
            .include(&options.include);
        let path = format!("/{}/{}/policy-sets", api::ORGANIZATIONS, organization);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, policy_set_id: &str) -> Result<PolicySet> {
        self.client.read_data(&policy_set_path(policy_set_id)?).await
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &PolicySetCreateOptions,
    ) -> Result<PolicySet> {
        require_org(organization)?;
        options.valid()?;
        debug!("Creating policy set {} in {}", options.name, organization);

        let mut body = RequestDocument::new("policy-sets", options);
        if !options.policy_ids.is_empty() {
            body = body.relate_many("policies", "policies", &options.policy_ids);
        }
        if !options.workspace_ids.is_empty() {
            body = body.relate_many("workspaces", "workspaces", &options.workspace_ids);
        }
        if !options.project_ids.is_empty() {
            body = body.relate_many("projects", "projects", &options.project_ids);
        }

        let path = format!("/{}/{}/policy-sets", api::ORGANIZATIONS, organization);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        policy_set_id: &str,
        options: &PolicySetUpdateOptions,
    ) -> Result<PolicySet> {
        let path = policy_set_path(policy_set_id)?;
        options.valid()?;
        let body = RequestDocument::new("policy-sets", options).with_id(policy_set_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, policy_set_id: &str) -> Result<()> {
        self.client.delete_path(&policy_set_path(policy_set_id)?).await
    }

    pub async fn add_policies(&self, policy_set_id: &str, policy_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/policies", policy_set_path(policy_set_id)?);
        let body = relationship_body("policies", policy_ids, ValidationError::RequiredPolicies)?;
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_policies(&self, policy_set_id: &str, policy_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/policies", policy_set_path(policy_set_id)?);
        let body = relationship_body("policies", policy_ids, ValidationError::RequiredPolicies)?;
        self.client.delete_with_body(&path, &body).await
    }

    pub async fn add_workspaces(&self, policy_set_id: &str, workspace_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/workspaces", policy_set_path(policy_set_id)?);
        let body = relationship_body(
            "workspaces",
            workspace_ids,
            ValidationError::RequiredWorkspacesList,
        )?;
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_workspaces(
        &self,
        policy_set_id: &str,
        workspace_ids: &[String],
    ) -> Result<()> {
        let path = format!("{}/relationships/workspaces", policy_set_path(policy_set_id)?);
        let body = relationship_body(
            "workspaces",
            workspace_ids,
            ValidationError::RequiredWorkspacesList,
        )?;
        self.client.delete_with_body(&path, &body).await
    }

    pub async fn add_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/projects", policy_set_path(policy_set_id)?);
        let body = relationship_body("projects", project_ids, ValidationError::RequiredProject)?;
        self.client.post_body(&path, &body).await
    }

    pub async fn remove_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        let path = format!("{}/relationships/projects", policy_set_path(policy_set_id)?);
        let body = relationship_body("projects", project_ids, ValidationError::RequiredProject)?;
        self.client.delete_with_body(&path, &body).await
    }
}
