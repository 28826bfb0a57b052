//! Site-admin view of organizations

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::require_org;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::{ResourceList, TfeResource};
use crate::hcp::TfeClient;

/// Organization as seen by a site administrator; the ID is the name
#[derive(Deserialize, Debug, Clone)]
pub struct AdminOrganization {
    pub id: String,
    pub attributes: AdminOrganizationAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct AdminOrganizationAttributes {
    pub name: String,
    pub access_beta_tools: bool,
    pub external_id: Option<String>,
    pub global_module_sharing: Option<bool>,
    pub global_provider_sharing: Option<bool>,
    pub is_disabled: bool,
    pub notification_email: Option<String>,
    pub sso_enabled: bool,
    pub terraform_build_worker_apply_timeout: Option<String>,
    pub terraform_build_worker_plan_timeout: Option<String>,
    pub terraform_worker_sudo_enabled: bool,
    pub workspace_limit: Option<u32>,
}

impl TfeResource for AdminOrganization {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        if self.attributes.name.is_empty() {
            &self.id
        } else {
            &self.attributes.name
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminOrganizationListOptions {
    pub list: ListOptions,
    /// Matches name or notification email
    pub query: Option<String>,
    /// Only organizations allowed to consume this org's modules
    pub module_producer: Option<String>,
    pub include: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AdminOrganizationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_beta_tools: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_module_sharing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_provider_sharing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_build_worker_apply_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_build_worker_plan_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_worker_sudo_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_limit: Option<u32>,
}

/// Admin organizations service
pub struct AdminOrganizations<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn admin_organizations(&self) -> AdminOrganizations<'_> {
        AdminOrganizations { client: self }
    }
}

fn admin_org_path(organization: &str) -> Result<String> {
    require_org(organization)?;
    Ok(format!("/admin/organizations/{}", organization))
}

impl AdminOrganizations<'_> {
    pub async fn list(
        &self,
        options: &AdminOrganizationListOptions,
    ) -> Result<ResourceList<AdminOrganization>> {
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("q", options.query.as_deref())
            .push_opt("filter[module_producer]", options.module_producer.as_deref())
            .include(&options.include);
        self.client
            .list_page(&query.apply("/admin/organizations"))
            .await
    }

    pub async fn read(&self, organization: &str) -> Result<AdminOrganization> {
        self.client.read_data(&admin_org_path(organization)?).await
    }

    pub async fn update(
        &self,
        organization: &str,
        options: &AdminOrganizationUpdateOptions,
    ) -> Result<AdminOrganization> {
        let path = admin_org_path(organization)?;
        debug!("Updating organization {} as site admin", organization);
        let body = RequestDocument::new("organizations", options).with_id(organization);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, organization: &str) -> Result<()> {
        self.client.delete_path(&admin_org_path(organization)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TfeError, ValidationError};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": name,
            "type": "organizations",
            "attributes": {"name": name, "is-disabled": false, "workspace-limit": 10}
        })
    }

    #[tokio::test]
    async fn test_list_with_query() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/admin/organizations"))
            .and(query_param("q", "acme"))
            .and(query_param("include", "owners"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [org_json("acme"), org_json("acme-dev")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 2}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = AdminOrganizationListOptions {
            query: Some("acme".into()),
            include: vec!["owners".into()],
            ..Default::default()
        };
        let orgs = client.admin_organizations().list(&opts).await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs.items[1].name(), "acme-dev");
        assert_eq!(orgs.items[0].attributes.workspace_limit, Some(10));
    }

    #[tokio::test]
    async fn test_disable_organization() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/admin/organizations/acme"))
            .and(body_partial_json(serde_json::json!({
                "data": {"id": "acme", "type": "organizations", "attributes": {"is-disabled": true}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "acme", "type": "organizations",
                         "attributes": {"name": "acme", "is-disabled": true}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = AdminOrganizationUpdateOptions {
            is_disabled: Some(true),
            ..Default::default()
        };
        let org = client
            .admin_organizations()
            .update("acme", &opts)
            .await
            .unwrap();
        assert!(org.attributes.is_disabled);
    }

    #[tokio::test]
    async fn test_delete_validates_name() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("DELETE"))
            .and(path("/admin/organizations/acme"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.admin_organizations().delete("acme").await.unwrap();

        let err = client.admin_organizations().delete("").await.unwrap_err();
        assert!(matches!(err, TfeError::Validation(ValidationError::InvalidOrg)));
    }
}
