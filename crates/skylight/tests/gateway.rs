//! Gateway behavior against a mock backend: auth headers, path
//! substitution, query serialization, and error classification.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skylight::api::chores::ChoreQuery;
use skylight::{AuthMode, Config, SkylightClient, SkylightError};

fn client_for(server: &MockServer, auth: AuthMode) -> SkylightClient {
    let config = Config::new("test-token", "frame-1", auth, "America/New_York").unwrap();
    SkylightClient::with_base_url(config, server.uri()).unwrap()
}

fn empty_listing() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": [] }))
}

#[tokio::test]
async fn frame_id_is_substituted_and_bearer_header_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/lists"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(empty_listing())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let lists = client.lists().await.unwrap();
    assert!(lists.is_empty());
}

#[tokio::test]
async fn basic_auth_mode_switches_header_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/lists"))
        .and(header("Authorization", "Basic test-token"))
        .respond_with(empty_listing())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Basic);
    client.lists().await.unwrap();
}

#[tokio::test]
async fn absent_query_params_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/chores"))
        .respond_with(empty_listing())
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    client
        .chores(&ChoreQuery {
            after: Some("2024-03-15".parse().unwrap()),
            before: None,
            include_late: Some(true),
            linked_to_profile: false,
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(keys.contains(&"after".to_string()));
    assert!(keys.contains(&"include_late".to_string()));
    assert!(!keys.contains(&"before".to_string()));
    assert!(!keys.contains(&"filter".to_string()));
}

#[tokio::test]
async fn booleans_are_stringified_in_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/chores"))
        .and(query_param("include_late", "true"))
        .respond_with(empty_listing())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    client
        .chores(&ChoreQuery {
            include_late: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_sends_no_body_and_no_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/frames/frame-1/chores/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    client.delete_chore("42").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn not_modified_is_an_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/chores"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let page = client.chores(&ChoreQuery::default()).await.unwrap();
    assert!(page.chores.is_empty());
    assert!(page.categories.is_empty());
}

#[tokio::test]
async fn unauthorized_classifies_regardless_of_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "token expired" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let err = client.lists().await.unwrap_err();
    assert!(matches!(err, SkylightError::Authentication));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn rate_limit_carries_retry_after_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let err = client.lists().await.unwrap_err();
    match err {
        SkylightError::RateLimit { retry_after } => assert_eq!(retry_after, Some(30)),
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_header_has_no_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let err = client.lists().await.unwrap_err();
    match err {
        SkylightError::RateLimit { retry_after } => assert_eq!(retry_after, None),
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn server_fault_is_retryable_client_fault_is_not() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/lists"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/frames/frame-1/devices"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unprocessable"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);

    let err = client.lists().await.unwrap_err();
    match &err {
        SkylightError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert!(message.contains("upstream down"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
    assert!(err.is_retryable());

    let err = client.devices().await.unwrap_err();
    assert!(matches!(err, SkylightError::Api { status: 422, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn no_response_at_all_is_a_network_error() {
    // A non-pooled server: `MockServer::start()` recycles listeners through a
    // process-wide pool, so dropping it would leave the port open.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let config = Config::new("test-token", "frame-1", AuthMode::Bearer, "UTC").unwrap();
    let client = SkylightClient::with_base_url(config, uri).unwrap();

    let err = client.lists().await.unwrap_err();
    assert!(matches!(err, SkylightError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn not_found_is_rewritten_with_the_entity_kind() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthMode::Bearer);
    let err = client.delete_list_item("1", "99").await.unwrap_err();
    assert_eq!(err.to_string(), "list item not found");
}
