//! Integration tests against a mock HTTP server
//!
//! Exercises the full flow: YAML registry → request construction → live HTTP
//! exchange → classification, retries, and all-pages collapse.

use pagewise::{
    ApiClient, CallOptions, ClientRegistry, EndpointConfig, Error, JsonPageDecoder, JsonValue,
    Method, StringMap, PAGE_SIZE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_for(server: &MockServer) -> ClientRegistry {
    ClientRegistry::new().register("api", EndpointConfig::new(server.uri(), "integration-key"))
}

fn no_query() -> StringMap {
    StringMap::new()
}

/// A JSON array body of `count` items tagged with their page
fn page_body(page: u32, count: usize) -> String {
    let items: Vec<JsonValue> = (0..count).map(|idx| json!({"page": page, "idx": idx})).collect();
    serde_json::to_string(&items).unwrap()
}

/// Mount a 200 response for one page number
async fn mount_page(server: &MockServer, page: u32, count: usize) {
    Mock::given(method("GET"))
        .and(path("/records"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(page, count)))
        .mount(server)
        .await;
}

// ============================================================================
// Single Requests
// ============================================================================

#[tokio::test]
async fn sends_credentials_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/whoami"))
        .and(header("X-API-KEY", "integration-key"))
        .and(header(
            "user-agent",
            format!("{}/{}", pagewise::NAME, pagewise::VERSION).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let response = client.get("api", "/whoami", &no_query()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.json().unwrap()["ok"], true);
}

#[tokio::test]
async fn classifies_api_errors_over_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418).set_body_string("short and stout"))
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let err = client.get("api", "/teapot", &no_query()).await.unwrap_err();

    assert!(matches!(err, Error::IpBanned { body } if body == "short and stout"));
}

#[tokio::test]
async fn retries_transient_failures_until_success() {
    let server = MockServer::start().await;
    // Two rate-limit answers, then the real one
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let response = client
        .request(
            "api",
            Method::GET,
            "/flaky",
            &no_query(),
            &CallOptions::new()
                .max_attempts(3)
                .retry_interval(Duration::from_millis(10)),
        )
        .await
        .unwrap();

    assert_eq!(response.body_text(), "recovered");
}

#[tokio::test]
async fn retry_exhaustion_surfaces_the_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("still broken"))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let err = client
        .request(
            "api",
            Method::GET,
            "/broken",
            &no_query(),
            &CallOptions::new()
                .max_attempts(2)
                .retry_interval(Duration::from_millis(10)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InternalServerError { body } if body == "still broken"));
}

#[tokio::test]
async fn skip_error_handling_returns_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(500).set_body_string("inspect me"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let response = client
        .request(
            "api",
            Method::GET,
            "/raw",
            &no_query(),
            &CallOptions::new().skip_error_handling(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body_text(), "inspect me");
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn fetches_all_pages_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, PAGE_SIZE).await;
    mount_page(&server, 2, PAGE_SIZE).await;
    mount_page(&server, 3, 47).await;
    // Pages past the end come back empty
    Mock::given(method("GET"))
        .and(path("/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let items = client
        .fetch_all(
            "api",
            Method::GET,
            "/records",
            &no_query(),
            &CallOptions::new().max_concurrency(3),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2 * PAGE_SIZE + 47);
    assert_eq!(items[0]["page"], 1);
    assert_eq!(items[PAGE_SIZE]["page"], 2);
    assert_eq!(items[2 * PAGE_SIZE]["page"], 3);
}

#[tokio::test]
async fn short_first_page_needs_no_second_request() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 12).await;

    let client = ApiClient::new(registry_for(&server));
    let items = client
        .fetch_all("api", Method::GET, "/records", &no_query(), &CallOptions::new())
        .await
        .unwrap();

    assert_eq!(items.len(), 12);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_page_fails_the_whole_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, 1, PAGE_SIZE).await;
    mount_page(&server, 2, PAGE_SIZE).await;
    Mock::given(method("GET"))
        .and(path("/records"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad page"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server));
    let err = client
        .fetch_all(
            "api",
            Method::GET,
            "/records",
            &no_query(),
            &CallOptions::new().max_concurrency(4).no_retry(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BadRequest { body } if body == "bad page"));
}

#[tokio::test]
async fn single_page_mode_returns_one_raw_page() {
    let server = MockServer::start().await;
    mount_page(&server, 7, 3).await;

    let client = ApiClient::new(registry_for(&server));
    let result = client
        .fetch_paginated(
            "api",
            Method::GET,
            "/records",
            &no_query(),
            &CallOptions::new().page(7),
        )
        .await
        .unwrap();

    let response = result.response().expect("single-page result");
    assert_eq!(response.json().unwrap().as_array().unwrap().len(), 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn envelope_decoder_drives_pagination() {
    let server = MockServer::start().await;
    let full: Vec<JsonValue> = (0..PAGE_SIZE).map(|idx| json!({"idx": idx})).collect();
    Mock::given(method("GET"))
        .and(path("/wrapped"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": full, "meta": {"page": 1}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wrapped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"idx": 0}], "meta": {"page": 2}})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(registry_for(&server))
        .with_decoder(Arc::new(JsonPageDecoder::with_path("data")));
    let items = client
        .fetch_all(
            "api",
            Method::GET,
            "/wrapped",
            &no_query(),
            &CallOptions::new().max_concurrency(1),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), PAGE_SIZE + 1);
}

// ============================================================================
// Registry Loading
// ============================================================================

#[tokio::test]
async fn yaml_registry_drives_a_live_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("X-Billing-Key", "file-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "clients:\n  billing:\n    base_url: {}\n    api_key: file-key\n    api_key_header: X-Billing-Key\n",
        server.uri()
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let registry = ClientRegistry::from_file(file.path()).unwrap();
    let client = ApiClient::new(registry);
    let response = client.get("billing", "/ping", &no_query()).await.unwrap();

    assert_eq!(response.body_text(), "pong");
}
