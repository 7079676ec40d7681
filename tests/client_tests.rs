//! HTTP client tests against a mock Confluence server.

mod common;

use confluence_export::auth::basic_auth_header;
use confluence_export::confluence::{ApiError, ConfluenceApi, ConfluenceClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures;

fn client_for(server: &MockServer) -> ConfluenceClient {
  ConfluenceClient::new(server.uri(), "user@example.com", "test-token", 5).unwrap()
}

#[tokio::test]
async fn get_page_sends_basic_auth_and_decodes_body() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/rest/api/content/123"))
    .and(header("Authorization", basic_auth_header("user@example.com", "test-token").as_str()))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_json("123", "Hello", "<p>Hi</p>")))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let page = client.get_page("123").await.unwrap();

  assert_eq!(page.id, "123");
  assert_eq!(page.title, "Hello");
  assert_eq!(page.storage_html(), Some("<p>Hi</p>"));
}

#[tokio::test]
async fn status_codes_map_to_error_variants() {
  let cases: [(u16, fn(&ApiError) -> bool); 4] = [
    (401, |e| matches!(e, ApiError::Unauthorized)),
    (403, |e| matches!(e, ApiError::Forbidden { .. })),
    (404, |e| matches!(e, ApiError::NotFound { .. })),
    (500, |e| matches!(e, ApiError::Unexpected { status: 500, .. })),
  ];

  for (status, check) in cases {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/content/55"))
      .respond_with(ResponseTemplate::new(status).set_body_string("denied"))
      .mount(&server)
      .await;

    let client = client_for(&server);
    let err = client.get_page("55").await.unwrap_err();
    assert!(check(&err), "status {status} produced wrong variant: {err:?}");
  }
}

#[tokio::test]
async fn forbidden_error_names_the_page() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/rest/api/content/777"))
    .respond_with(ResponseTemplate::new(403))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let err = client.get_page("777").await.unwrap_err();
  assert!(err.to_string().contains("777"));
}

#[tokio::test]
async fn invalid_json_is_an_invalid_response_error() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/rest/api/content/123"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let err = client.get_page("123").await.unwrap_err();
  assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn child_listing_follows_pagination() {
  let server = MockServer::start().await;

  // The server applies a limit of 2, so the client has to keep paging.
  Mock::given(method("GET"))
    .and(path("/rest/api/content/1/child/page"))
    .and(query_param("start", "0"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "results": [
        { "id": "2", "title": "First" },
        { "id": "3", "title": "Second" }
      ],
      "start": 0,
      "limit": 2,
      "size": 2
    })))
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/content/1/child/page"))
    .and(query_param("start", "2"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "results": [
        { "id": "4", "title": "Third" }
      ],
      "start": 2,
      "limit": 2,
      "size": 1
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let children = client.get_child_pages("1").await.unwrap();

  assert_eq!(children.len(), 3);
  assert_eq!(children[0].id, "2");
  assert_eq!(children[1].id, "3");
  assert_eq!(children[2].id, "4");
}

#[tokio::test]
async fn empty_child_listing_is_ok() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/rest/api/content/1/child/page"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "results": [],
      "start": 0,
      "limit": 50,
      "size": 0
    })))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let children = client.get_child_pages("1").await.unwrap();
  assert!(children.is_empty());
}
