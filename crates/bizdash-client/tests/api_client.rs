//! Integration tests for the API client against a mock HTTP server

#![allow(clippy::unwrap_used)]

use bizdash_client::{ApiClient, ClientError, CollectionShape, CredentialStore};
use bizdash_core::config::ApiConfig;
use bizdash_core::types::{Report, UserAccount};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, credentials: CredentialStore) -> ApiClient {
    ApiClient::new(server.uri(), credentials).unwrap()
}

#[tokio::test]
async fn test_bearer_token_read_at_call_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = CredentialStore::with_token("first");
    let client = client_for(&server, credentials.clone());

    // Token changes after the client was built must be picked up
    credentials.set("second");
    let users: Vec<UserAccount> = client
        .get_collection("/api/all", CollectionShape::Bare)
        .await
        .unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ada", "email": "ada@example.com" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialStore::new());
    let users: Vec<UserAccount> = client
        .get_collection("/api/all", CollectionShape::Bare)
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ada");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_wrapped_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [{
                "id": 1,
                "reviewId": 10,
                "reason": "typo",
                "Review": { "title": "Nice" },
                "User": { "name": "bo" }
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialStore::new());
    let reports: Vec<Report> = client
        .get_collection("/api/reports", CollectionShape::Wrapped("reports"))
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].review_id, 10);
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/review/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialStore::new());
    let err = client.delete("/api/review/9").await.unwrap_err();

    assert!(matches!(err, ClientError::Status { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/4/status"))
        .and(body_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialStore::new());
    client
        .patch_json("/api/products/4/status", &json!({ "status": "approved" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialStore::new());
    let err = client
        .get_collection::<UserAccount>("/api/all", CollectionShape::Bare)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_request_timeout_settles_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    let client = ApiClient::from_config(&api, CredentialStore::new()).unwrap();
    let err = client
        .get_collection::<UserAccount>("/api/all", CollectionShape::Bare)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(ref e) if e.is_timeout()));
}
