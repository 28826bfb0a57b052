//! End-to-end tests of the public client API against a mock server

use std::time::Duration;

use tfe_client::hcp::variables::{CategoryType, VariableCreateOptions};
use tfe_client::hcp::workspaces::{WorkspaceListOptions, WorkspaceLockOptions};
use tfe_client::{ClientConfig, ListOptions, RetryPolicy, TfeClient, TfeError, ValidationError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn client_for(server: &MockServer) -> TfeClient {
    init_logging();
    let config = ClientConfig::new("test-token")
        .with_address(server.uri())
        .with_retry(RetryPolicy::default().with_wait(Duration::from_millis(5), Duration::from_millis(10)));
    TfeClient::new(config).unwrap()
}

fn workspace_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "workspaces",
        "attributes": {"name": name}
    })
}

#[tokio::test]
async fn test_requests_carry_auth_and_custom_headers() {
    let server = MockServer::start().await;
    init_logging();
    let client = TfeClient::new(
        ClientConfig::new("secret")
            .with_address(server.uri())
            .with_header("X-Request-Source", "integration"),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/ping"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("X-Request-Source", "integration"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("TFP-API-Version", "2.6")
                .insert_header("TFP-AppName", "HCP Terraform")
                .insert_header("X-RateLimit-Limit", "30"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let info = client.ping().await.unwrap();
    assert_eq!(info.api_version.as_deref(), Some("2.6"));
    assert_eq!(info.rate_limit, Some(30.0));
    assert_eq!(client.is_cloud(), Some(true));
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/v2/workspaces/ws-1"))
        .respond_with(ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "0.01"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/workspaces/ws-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": workspace_json("ws-1", "prod")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ws = client.workspaces().read_by_id("ws-1").await.unwrap();
    assert_eq!(ws.attributes.name, "prod");
}

#[tokio::test]
async fn test_server_errors_not_retried_by_default() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/v2/workspaces/ws-1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "errors": [{"status": "503", "title": "unavailable", "detail": "maintenance"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.workspaces().read_by_id("ws-1").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn test_unauthorized_and_not_found() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/runs/run-missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.organizations().read("my-org").await.unwrap_err();
    assert!(matches!(err, TfeError::Unauthorized));

    let err = client.runs().read("run-missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_workspaces_with_filters() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org/workspaces"))
        .and(query_param("search[name]", "prod"))
        .and(query_param("page[number]", "2"))
        .and(query_param("page[size]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [workspace_json("ws-2", "prod-b")],
            "meta": {"pagination": {
                "current-page": 2, "prev-page": 1, "next-page": null,
                "total-pages": 2, "total-count": 2
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = WorkspaceListOptions {
        search: Some("prod".to_string()),
        list: ListOptions::page(2, 1),
        ..Default::default()
    };
    let page = client.workspaces().list("my-org", &opts).await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(!page.has_next_page());
    let pagination = page.pagination.unwrap();
    assert_eq!(pagination.previous_page, Some(1));
    assert_eq!(pagination.total_count, 2);
}

#[tokio::test]
async fn test_lock_conflict_maps_to_workspace_locked() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/v2/workspaces/ws-1/actions/lock"))
        .and(body_partial_json(serde_json::json!({"reason": "maintenance"})))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let opts = WorkspaceLockOptions {
        reason: Some("maintenance".to_string()),
    };
    let err = client.workspaces().lock("ws-1", &opts).await.unwrap_err();
    assert!(matches!(err, TfeError::WorkspaceLocked));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_server() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .variables()
        .create("", &VariableCreateOptions::new("region", "eu-west-1", CategoryType::Env))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TfeError::Validation(ValidationError::InvalidWorkspaceId)
    ));

    let err = client
        .variables()
        .create("ws-1", &VariableCreateOptions::new("", "x", CategoryType::Terraform))
        .await
        .unwrap_err();
    assert!(matches!(err, TfeError::Validation(ValidationError::RequiredKey)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_variable_sends_json_api_document() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/v2/workspaces/ws-1/vars"))
        .and(header("Content-Type", "application/vnd.api+json"))
        .and(body_partial_json(serde_json::json!({
            "data": {
                "type": "vars",
                "attributes": {"key": "region", "value": "eu-west-1", "category": "env"}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": "var-1",
                "type": "vars",
                "attributes": {"key": "region", "value": "eu-west-1", "category": "env"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let var = client
        .variables()
        .create("ws-1", &VariableCreateOptions::new("region", "eu-west-1", CategoryType::Env))
        .await
        .unwrap();
    assert_eq!(var.id, "var-1");
}
