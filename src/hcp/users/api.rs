//! User account API operations

use crate::error::Result;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::TfeClient;

use super::models::{User, UserUpdateOptions};

/// Current-user account service
pub struct Users<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }
}

impl Users<'_> {
    /// The user owning the API token
    pub async fn read_current(&self) -> Result<User> {
        self.client.read_data("/account/details").await
    }

    pub async fn update_current(&self, options: &UserUpdateOptions) -> Result<User> {
        options.valid()?;
        let body = RequestDocument::new("users", options);
        self.client.update_data("/account/update", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TfeError, ValidationError};
    use crate::hcp::traits::TfeResource;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json(username: &str) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "id": "user-1",
                "type": "users",
                "attributes": {
                    "username": username,
                    "email": "me@example.com",
                    "is-service-account": false,
                    "two-factor": {"enabled": true, "verified": true}
                }
            }
        })
    }

    #[tokio::test]
    async fn test_read_current_user() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/account/details"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("alice")))
            .mount(&mock_server)
            .await;

        let user = client.users().read_current().await.unwrap();
        assert_eq!(user.name(), "alice");
        assert!(user.attributes.two_factor.unwrap().verified);
    }

    #[tokio::test]
    async fn test_read_current_unauthorized() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/account/details"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        assert!(matches!(
            client.users().read_current().await,
            Err(TfeError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_update_current_user() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/account/update"))
            .and(body_json(serde_json::json!({
                "data": {"type": "users", "attributes": {"username": "bob"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("bob")))
            .mount(&mock_server)
            .await;

        let opts = UserUpdateOptions {
            username: Some("bob".to_string()),
            email: None,
        };
        let user = client.users().update_current(&opts).await.unwrap();
        assert_eq!(user.attributes.username, "bob");

        let bad = UserUpdateOptions {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            client.users().update_current(&bad).await,
            Err(TfeError::Validation(ValidationError::InvalidEmail))
        ));
    }
}
