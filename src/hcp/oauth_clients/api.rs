//! OAuth client and token API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::{ApiListResponse, ResourceList};
use crate::hcp::TfeClient;

use super::models::{
    OAuthClient, OAuthClientCreateOptions, OAuthClientUpdateOptions, OAuthToken,
    OAuthTokenUpdateOptions,
};

/// OAuth clients service (VCS connections)
pub struct OAuthClients<'a> {
    client: &'a TfeClient,
}

/// OAuth tokens service
pub struct OAuthTokens<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn oauth_clients(&self) -> OAuthClients<'_> {
        OAuthClients { client: self }
    }

    pub fn oauth_tokens(&self) -> OAuthTokens<'_> {
        OAuthTokens { client: self }
    }
}

fn org_clients_path(organization: &str) -> Result<String> {
    require_org(organization)?;
    Ok(format!("/{}/{}/oauth-clients", api::ORGANIZATIONS, organization))
}

fn oauth_client_path(client_id: &str) -> Result<String> {
    require_id(client_id, ValidationError::InvalidOAuthClientId)?;
    Ok(format!("/oauth-clients/{}", client_id))
}

fn oauth_token_path(token_id: &str) -> Result<String> {
    require_id(token_id, ValidationError::InvalidOAuthTokenId)?;
    Ok(format!("/oauth-tokens/{}", token_id))
}

impl OAuthClients<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<OAuthClient>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&org_clients_path(organization)?))
            .await
    }

    /// Every OAuth client of an organization, all pages
    pub async fn list_all(&self, organization: &str) -> Result<Vec<OAuthClient>> {
        let path = org_clients_path(organization)?;
        let clients = self
            .client
            .fetch_all_pages::<OAuthClient, ApiListResponse<OAuthClient>>(
                &path,
                &format!("OAuth clients for org '{}'", organization),
            )
            .await?;
        debug!(
            "Fetched {} total OAuth clients for org '{}'",
            clients.len(),
            organization
        );
        Ok(clients)
    }

    pub async fn read(&self, client_id: &str) -> Result<OAuthClient> {
        self.client.read_data(&oauth_client_path(client_id)?).await
    }

    pub async fn create(
        &self,
        organization: &str,
        options: &OAuthClientCreateOptions,
    ) -> Result<OAuthClient> {
        let path = org_clients_path(organization)?;
        options.valid()?;
        debug!(
            "Creating {} OAuth client in {}",
            options.service_provider, organization
        );
        let body = RequestDocument::new("oauth-clients", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        client_id: &str,
        options: &OAuthClientUpdateOptions,
    ) -> Result<OAuthClient> {
        let path = oauth_client_path(client_id)?;
        let body = RequestDocument::new("oauth-clients", options).with_id(client_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, client_id: &str) -> Result<()> {
        self.client.delete_path(&oauth_client_path(client_id)?).await
    }
}

impl OAuthTokens<'_> {
    /// Tokens of one OAuth client
    pub async fn list(
        &self,
        client_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<OAuthToken>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("{}/oauth-tokens", oauth_client_path(client_id)?);
        self.client.list_page(&query.apply(&path)).await
    }

    /// Tokens across all OAuth clients of an organization
    pub async fn list_for_organization(
        &self,
        organization: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<OAuthToken>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        query.list_options(options);
        let path = format!("/{}/{}/oauth-tokens", api::ORGANIZATIONS, organization);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, token_id: &str) -> Result<OAuthToken> {
        self.client.read_data(&oauth_token_path(token_id)?).await
    }

    pub async fn update(
        &self,
        token_id: &str,
        options: &OAuthTokenUpdateOptions,
    ) -> Result<OAuthToken> {
        let path = oauth_token_path(token_id)?;
        let body = RequestDocument::new("oauth-tokens", options).with_id(token_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, token_id: &str) -> Result<()> {
        self.client.delete_path(&oauth_token_path(token_id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::hcp::oauth_clients::service_provider;
    use crate::hcp::traits::TfeResource;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oauth_client_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "oauth-clients",
            "attributes": {"name": name, "service-provider": "github"}
        })
    }

    #[tokio::test]
    async fn test_list_all_paginates() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/oauth-clients"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [oauth_client_json("oc-1", "first")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/oauth-clients"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [oauth_client_json("oc-2", "second")],
                "meta": {"pagination": {"current-page": 2, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        let clients = client.oauth_clients().list_all("my-org").await.unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name(), "first");
        assert_eq!(clients[1].name(), "second");
    }

    #[tokio::test]
    async fn test_create_oauth_client() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/oauth-clients"))
            .and(body_partial_json(serde_json::json!({
                "data": {
                    "type": "oauth-clients",
                    "attributes": {
                        "service-provider": "github",
                        "api-url": "https://api.github.com",
                        "http-url": "https://github.com",
                        "oauth-token-string": "ghp_xxx"
                    }
                }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"data": oauth_client_json("oc-new", "gh")})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut opts = OAuthClientCreateOptions::new(
            service_provider::GITHUB,
            "https://api.github.com",
            "https://github.com",
        );
        opts.oauth_token_string = Some("ghp_xxx".into());
        let oc = client.oauth_clients().create("my-org", &opts).await.unwrap();
        assert_eq!(oc.id, "oc-new");
    }

    #[tokio::test]
    async fn test_create_validates_before_request() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        let opts = OAuthClientCreateOptions::new("", "https://api.github.com", "https://github.com");
        let err = client
            .oauth_clients()
            .create("my-org", &opts)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TfeError::Validation(ValidationError::RequiredServiceProvider)
        ));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_oauth_client_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/oauth-clients/oc-missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client.oauth_clients().read("oc-missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_tokens_and_update() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/oauth-clients/oc-1/oauth-tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "ot-1", "type": "oauth-tokens",
                          "attributes": {"service-provider-user": "octocat"}}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/oauth-tokens/ot-1"))
            .and(body_partial_json(serde_json::json!({
                "data": {"id": "ot-1", "attributes": {"private-ssh-key": "KEY"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "ot-1", "type": "oauth-tokens", "attributes": {"has-ssh-key": true}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tokens = client
            .oauth_tokens()
            .list("oc-1", &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(tokens.items[0].service_provider_user(), "octocat");

        let updated = client
            .oauth_tokens()
            .update(
                "ot-1",
                &OAuthTokenUpdateOptions {
                    private_ssh_key: Some("KEY".into()),
                },
            )
            .await
            .unwrap();
        assert!(updated.has_ssh_key());
    }

    #[tokio::test]
    async fn test_delete_token() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("DELETE"))
            .and(path("/oauth-tokens/ot-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.oauth_tokens().delete("ot-1").await.unwrap();
    }
}
