//! SSH key API operations

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{SshKey, SshKeyCreateOptions, SshKeyUpdateOptions};

/// SSH keys service
pub struct SshKeys<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn ssh_keys(&self) -> SshKeys<'_> {
        SshKeys { client: self }
    }
}

fn org_keys_path(organization: &str) -> Result<String> {
    require_org(organization)?;
    Ok(format!("/{}/{}/ssh-keys", api::ORGANIZATIONS, organization))
}

fn ssh_key_path(key_id: &str) -> Result<String> {
    require_id(key_id, ValidationError::InvalidSshKeyId)?;
    Ok(format!("/ssh-keys/{}", key_id))
}

impl SshKeys<'_> {
    pub async fn list(&self, organization: &str, options: &ListOptions) -> Result<ResourceList<SshKey>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&org_keys_path(organization)?))
            .await
    }

    pub async fn read(&self, key_id: &str) -> Result<SshKey> {
        self.client.read_data(&ssh_key_path(key_id)?).await
    }

    pub async fn create(&self, organization: &str, options: &SshKeyCreateOptions) -> Result<SshKey> {
        let path = org_keys_path(organization)?;
        options.valid()?;
        let body = RequestDocument::new("ssh-keys", options);
        self.client.create_data(&path, &body).await
    }

    pub async fn update(&self, key_id: &str, options: &SshKeyUpdateOptions) -> Result<SshKey> {
        let path = ssh_key_path(key_id)?;
        let body = RequestDocument::new("ssh-keys", options).with_id(key_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, key_id: &str) -> Result<()> {
        self.client.delete_path(&ssh_key_path(key_id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::hcp::traits::TfeResource;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_ssh_key() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/ssh-keys"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "ssh-keys",
                    "attributes": {"name": "deploy", "value": "PRIVATE"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {"id": "sshkey-1", "type": "ssh-keys", "attributes": {"name": "deploy"}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let key = client
            .ssh_keys()
            .create("my-org", &SshKeyCreateOptions::new("deploy", "PRIVATE"))
            .await
            .unwrap();
        assert_eq!(key.id, "sshkey-1");
        assert_eq!(key.name(), "deploy");
    }

    #[tokio::test]
    async fn test_list_ssh_keys() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/ssh-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "sshkey-1", "type": "ssh-keys", "attributes": {"name": "a"}},
                    {"id": "sshkey-2", "type": "ssh-keys", "attributes": {"name": "b"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let keys = client
            .ssh_keys()
            .list("my-org", &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(keys.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/ssh-keys/sshkey-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "sshkey-1", "type": "ssh-keys", "attributes": {"name": "renamed"}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/ssh-keys/sshkey-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = SshKeyUpdateOptions {
            name: Some("renamed".into()),
            value: None,
        };
        let key = client.ssh_keys().update("sshkey-1", &opts).await.unwrap();
        assert_eq!(key.name(), "renamed");
        client.ssh_keys().delete("sshkey-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_key_id() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        let err = client.ssh_keys().read("").await.unwrap_err();
        assert!(matches!(
            err,
            TfeError::Validation(ValidationError::InvalidSshKeyId)
        ));
    }
}
