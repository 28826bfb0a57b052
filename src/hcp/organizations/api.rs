//! Organization API operations

use log::debug;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_org;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::runs::Run;
use crate::hcp::traits::{ApiListResponse, ResourceList};
use crate::hcp::TfeClient;

use super::models::{
    Capacity, Entitlements, Organization, OrganizationCreateOptions, OrganizationListOptions,
    OrganizationToken, OrganizationTokenCreateOptions, OrganizationUpdateOptions,
};

/// Organizations service
pub struct Organizations<'a> {
    client: &'a TfeClient,
}

/// Organization-level API token service
pub struct OrganizationTokens<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn organizations(&self) -> Organizations<'_> {
        Organizations { client: self }
    }

    pub fn organization_tokens(&self) -> OrganizationTokens<'_> {
        OrganizationTokens { client: self }
    }
}

fn org_path(organization: &str) -> String {
    format!("/{}/{}", api::ORGANIZATIONS, organization)
}

impl Organizations<'_> {
    /// List organizations accessible to the token
    pub async fn list(&self, options: &OrganizationListOptions) -> Result<ResourceList<Organization>> {
        let mut query = QueryParams::new();
        query.list_options(&options.list);
        query.push_opt("q", options.query.as_deref());
        self.client
            .list_page(&query.apply(&format!("/{}", api::ORGANIZATIONS)))
            .await
    }

    /// Fetch every organization, all pages
    pub async fn list_all(&self) -> Result<Vec<Organization>> {
        self.client
            .fetch_all_pages::<Organization, ApiListResponse<Organization>>(
                &format!("/{}", api::ORGANIZATIONS),
                "organizations",
            )
            .await
    }

    pub async fn read(&self, organization: &str) -> Result<Organization> {
        require_org(organization)?;
        self.client.read_data(&org_path(organization)).await
    }

    pub async fn create(&self, options: &OrganizationCreateOptions) -> Result<Organization> {
        options.valid()?;
        debug!("Creating organization {}", options.name);
        let body = RequestDocument::new("organizations", options);
        self.client
            .create_data(&format!("/{}", api::ORGANIZATIONS), &body)
            .await
    }

    pub async fn update(
        &self,
        organization: &str,
        options: &OrganizationUpdateOptions,
    ) -> Result<Organization> {
        require_org(organization)?;
        options.valid()?;
        let body = RequestDocument::new("organizations", options);
        self.client.update_data(&org_path(organization), &body).await
    }

    pub async fn delete(&self, organization: &str) -> Result<()> {
        require_org(organization)?;
        debug!("Deleting organization {}", organization);
        self.client.delete_path(&org_path(organization)).await
    }

    /// Pending and running run counts
    pub async fn read_capacity(&self, organization: &str) -> Result<Capacity> {
        require_org(organization)?;
        self.client
            .read_data(&format!("{}/capacity", org_path(organization)))
            .await
    }

    pub async fn read_entitlements(&self, organization: &str) -> Result<Entitlements> {
        require_org(organization)?;
        self.client
            .read_data(&format!("{}/entitlement-set", org_path(organization)))
            .await
    }

    /// Runs currently queued or executing across the organization
    pub async fn read_run_queue(
        &self,
        organization: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<Run>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&format!("{}/runs/queue", org_path(organization))))
            .await
    }
}

impl OrganizationTokens<'_> {
    /// Generate a new token, replacing any existing one
    pub async fn create(
        &self,
        organization: &str,
        options: &OrganizationTokenCreateOptions,
    ) -> Result<OrganizationToken> {
        require_org(organization)?;
        let body = RequestDocument::new("authentication-token", options);
        self.client
            .create_data(
                &format!("{}/authentication-token", org_path(organization)),
                &body,
            )
            .await
    }

    pub async fn read(&self, organization: &str) -> Result<OrganizationToken> {
        require_org(organization)?;
        self.client
            .read_data(&format!("{}/authentication-token", org_path(organization)))
            .await
    }

    pub async fn delete(&self, organization: &str) -> Result<()> {
        require_org(organization)?;
        self.client
            .delete_path(&format!("{}/authentication-token", org_path(organization)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TfeError, ValidationError};
    use crate::hcp::traits::TfeResource;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org_json(id: &str, external_id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "organizations",
            "attributes": {
                "name": id,
                "email": "test@example.com",
                "external-id": external_id,
                "created-at": "2025-01-01T00:00:00Z"
            }
        })
    }

    #[tokio::test]
    async fn test_list_organizations() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .and(query_param("page[number]", "2"))
            .and(query_param("q", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [org_json("acme-1", "org-1"), org_json("acme-2", "org-2")],
                "meta": {"pagination": {"current-page": 2, "prev-page": 1, "next-page": 3, "total-pages": 3, "total-count": 6}}
            })))
            .mount(&mock_server)
            .await;

        let opts = OrganizationListOptions {
            list: ListOptions::page(2, 2),
            query: Some("acme".to_string()),
        };
        let page = client.organizations().list(&opts).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[1].name(), "acme-2");
        assert!(page.has_next_page());
    }

    #[tokio::test]
    async fn test_list_all_organizations() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [org_json("org-a", "org-1")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 1}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let orgs = client.organizations().list_all().await.unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].external_id(), "org-1");
    }

    #[tokio::test]
    async fn test_read_organization_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client.organizations().read("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_invalid_org_makes_no_request() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = client.organizations().read("bad/org").await.unwrap_err();
        assert!(matches!(err, TfeError::Validation(ValidationError::InvalidOrg)));
    }

    #[tokio::test]
    async fn test_create_organization() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "organizations",
                    "attributes": {"name": "new-org", "email": "ops@example.com"}
                }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"data": org_json("new-org", "org-NEW")})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let org = client
            .organizations()
            .create(&OrganizationCreateOptions::new("new-org", "ops@example.com"))
            .await
            .unwrap();
        assert_eq!(org.id, "new-org");
    }

    #[tokio::test]
    async fn test_update_and_delete_organization() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/organizations/my-org"))
            .and(body_json(serde_json::json!({
                "data": {"type": "organizations", "attributes": {"session-timeout": 30}}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": org_json("my-org", "org-1")})),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/organizations/my-org"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = OrganizationUpdateOptions {
            session_timeout: Some(30),
            ..Default::default()
        };
        client.organizations().update("my-org", &opts).await.unwrap();
        client.organizations().delete("my-org").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_capacity_and_entitlements() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/capacity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "my-org", "type": "organization-capacity", "attributes": {"pending": 2, "running": 1}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/entitlement-set"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "org-1", "type": "entitlement-sets", "attributes": {"sentinel": true}}
            })))
            .mount(&mock_server)
            .await;

        let capacity = client.organizations().read_capacity("my-org").await.unwrap();
        assert_eq!(capacity.attributes.pending, 2);
        assert_eq!(capacity.attributes.running, 1);

        let ent = client.organizations().read_entitlements("my-org").await.unwrap();
        assert!(ent.attributes.sentinel);
        assert!(!ent.attributes.teams);
    }

    #[tokio::test]
    async fn test_read_run_queue() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/runs/queue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "run-1", "type": "runs", "attributes": {"status": "planning"}}],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 1}}
            })))
            .mount(&mock_server)
            .await;

        let queue = client
            .organizations()
            .read_run_queue("my-org", &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(queue.items[0].id, "run-1");
    }

    #[tokio::test]
    async fn test_organization_token_lifecycle() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/authentication-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {
                    "id": "at-1",
                    "type": "authentication-tokens",
                    "attributes": {"token": "secret", "created-at": "2025-01-01T00:00:00Z"}
                }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/organizations/my-org/authentication-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let token = client
            .organization_tokens()
            .create("my-org", &OrganizationTokenCreateOptions::default())
            .await
            .unwrap();
        assert_eq!(token.attributes.token.as_deref(), Some("secret"));

        client.organization_tokens().delete("my-org").await.unwrap();
    }
}
