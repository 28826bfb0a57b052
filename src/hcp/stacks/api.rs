//! Stack API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{require_id, require_org};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::QueryParams;
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Stack, StackCreateOptions, StackListOptions, StackUpdateOptions};

/// Stacks service
pub struct Stacks<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn stacks(&self) -> Stacks<'_> {
        Stacks { client: self }
    }
}

fn stack_path(stack_id: &str) -> Result<String> {
    require_id(stack_id, ValidationError::InvalidStackId)?;
    Ok(format!("/stacks/{}", stack_id))
}

impl Stacks<'_> {
    pub async fn list(
        &self,
        organization: &str,
        options: &StackListOptions,
    ) -> Result<ResourceList<Stack>> {
        require_org(organization)?;
        let mut query = QueryParams::new();
        query
            .list_options(&options.list)
            .push_opt("filter[project[id]]", options.project_id.as_deref())
            .push_opt("search[name]", options.search.as_deref());
        let path = format!("/{}/{}/stacks", api::ORGANIZATIONS, organization);
        self.client.list_page(&query.apply(&path)).await
    }

    pub async fn read(&self, stack_id: &str) -> Result<Stack> {
        self.client.read_data(&stack_path(stack_id)?).await
    }

    pub async fn create(&self, options: &StackCreateOptions) -> Result<Stack> {
        options.valid()?;
        debug!("Creating stack {} in {}", options.name, options.project_id);
        let body = RequestDocument::new("stacks", options).relate_one(
            "project",
            "projects",
            &options.project_id,
        );
        self.client.create_data("/stacks", &body).await
    }

    pub async fn update(&self, stack_id: &str, options: &StackUpdateOptions) -> Result<Stack> {
        let path = stack_path(stack_id)?;
        let body = RequestDocument::new("stacks", options).with_id(stack_id);
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, stack_id: &str) -> Result<()> {
        self.client.delete_path(&stack_path(stack_id)?).await
    }

    /// Pull the newest configuration from the stack's repository
    pub async fn fetch_latest_from_vcs(&self, stack_id: &str) -> Result<Stack> {
        let path = format!("{}/fetch-latest-from-vcs", stack_path(stack_id)?);
        self.client.post_for_data(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::hcp::stacks::StackVcsRepo;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn stack_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "stacks",
            "attributes": {"name": "app"}
        })
    }

    #[tokio::test]
    async fn test_create_stack() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/stacks"))
            .and(body_partial_json(serde_json::json!({
                "data": {
                    "type": "stacks",
                    "attributes": {"name": "app", "vcs-repo": {"identifier": "acme/infra"}},
                    "relationships": {"project": {"data": {"id": "prj-1", "type": "projects"}}}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"data": stack_json("st-new")})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let repo = StackVcsRepo {
            identifier: "acme/infra".into(),
            ..Default::default()
        };
        let stack = client
            .stacks()
            .create(&StackCreateOptions::new("app", "prj-1", repo))
            .await
            .unwrap();
        assert_eq!(stack.id, "st-new");
    }

    #[tokio::test]
    async fn test_list_by_project() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/stacks"))
            .and(query_param("filter[project[id]]", "prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [stack_json("st-1"), stack_json("st-2")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let opts = StackListOptions {
            project_id: Some("prj-1".into()),
            ..Default::default()
        };
        let stacks = client.stacks().list("my-org", &opts).await.unwrap();
        assert_eq!(stacks.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_latest_from_vcs() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/stacks/st-1/fetch-latest-from-vcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": stack_json("st-1")})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let stack = client.stacks().fetch_latest_from_vcs("st-1").await.unwrap();
        assert_eq!(stack.id, "st-1");
    }

    #[tokio::test]
    async fn test_delete_and_invalid_id() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("DELETE"))
            .and(path("/stacks/st-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.stacks().delete("st-1").await.unwrap();
        let err = client.stacks().read("").await.unwrap_err();
        assert!(matches!(err, TfeError::Validation(ValidationError::InvalidStackId)));
    }
}
