//! Policy API operations

use bytes::Bytes;
use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Policy, PolicyCreateOptions, PolicyListOptions, PolicyUpdateOptions};

/// Policies service
pub struct Policies<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn policies(&self) -> Policies<'_> {
        Policies { client: self }
    }
}

fn org_policies_path(organization: &str) -> Result<String> {
    require_org(organization)?;
    Ok(format!("/{}/{}/policies", api::ORGANIZATIONS, organization))
}

fn policy_path(policy_id: &str) -> Result<String> {
    require_id(policy_id, ValidationError::InvalidPolicyId)?;
    Ok(format!("/policies/{}", policy_id))
}

impl Policies<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &PolicyListOptions,
    ) -> Result<ResourceList<Policy>> {
        let path = org_policies_path(organization)?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("search[name]", options.search.as_deref())
            .push_opt("filter[kind]", options.kind);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, policy_id: &str) -> Result<Policy> {
        self.client.read_data(&policy_path(policy_id)?).await
    }

    /// Create the policy record; its code is sent with [`Policies::upload`]
    pub async fn create(&self, organization: &str, options: &PolicyCreateOptions) -> Result<Policy> {
        let path = org_policies_path(organization)?;
        options.valid()?;
        debug!("Creating {} policy {}", options.kind, options.name);
        let body = RequestDocument::new("policies", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(&self, policy_id: &str, options: &PolicyUpdateOptions) -> Result<Policy> {
        let path = policy_path(policy_id)?;
        let body = RequestDocument::new("policies", options).with_id(policy_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<()> {
        self.client.delete_path(&policy_path(policy_id)?).await
    }

    /// Replace the policy code
    pub async fn upload(&self, policy_id: &str, content: Bytes) -> Result<()> {
        let path = format!("{}/upload", policy_path(policy_id)?);
        self.client.put_octets(&path, content).await
    }

    /// Current policy code
    pub async fn download(&self, policy_id: &str) -> Result<Bytes> {
        let path = format!("{}/download", policy_path(policy_id)?);
        self.client.get_bytes(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::hcp::policies::{EnforcementLevel, PolicyKind};
    use wiremock::matchers::{body_bytes, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn policy_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "id": id,
                "type": "policies",
                "attributes": {"name": name, "kind": "sentinel", "enforcement-level": "advisory"}
            }
        })
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/policies"))
            .and(query_param("search[name]", "deny"))
            .and(query_param("filter[kind]", "opa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [policy_json("pol-1", "deny-all")["data"]]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = PolicyListOptions {
            search: Some("deny".into()),
            kind: Some(PolicyKind::Opa),
            ..Default::default()
        };
        let policies = client.policies().list("my-org", &opts).await.unwrap();
        assert_eq!(policies.len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_upload() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/policies"))
            .respond_with(ResponseTemplate::new(201).set_body_json(policy_json("pol-new", "limits")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/policies/pol-new/upload"))
            .and(header("content-type", "application/octet-stream"))
            .and(header_exists("authorization"))
            .and(body_bytes(b"main = rule { true }".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let policies = client.policies();
        let opts = PolicyCreateOptions::new("limits", PolicyKind::Sentinel, EnforcementLevel::Advisory);
        let policy = policies.create("my-org", &opts).await.unwrap();
        policies
            .upload(&policy.id, Bytes::from_static(b"main = rule { true }"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_download() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/policies/pol-1/download"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"main = rule { false }".to_vec()))
            .mount(&mock_server)
            .await;

        let code = client.policies().download("pol-1").await.unwrap();
        assert_eq!(&code[..], b"main = rule { false }");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/policies/pol-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(policy_json("pol-1", "limits")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/policies/pol-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = PolicyUpdateOptions {
            enforcement_level: Some(EnforcementLevel::HardMandatory),
            ..Default::default()
        };
        client.policies().update("pol-1", &opts).await.unwrap();
        client.policies().delete("pol-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_policy_id() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        let err = client.policies().read("a/b").await.unwrap_err();
        assert!(matches!(
            err,
            TfeError::Validation(ValidationError::InvalidPolicyId)
        ));
    }
}
