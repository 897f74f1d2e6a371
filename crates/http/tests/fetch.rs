//! Fetch tests against a mock server.

use sortable_http::{HttpClient, HttpError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_bytes_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/prices.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"name,price\nTea,2.5\n".to_vec()))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let body = client
        .fetch_bytes(&format!("{}/files/prices.csv", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"name,price\nTea,2.5\n");
}

/// Requests must not be served from a cache.
#[tokio::test]
async fn test_fetch_sends_no_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/book.xlsx"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let body = client
        .fetch_bytes(&format!("{}/book.xlsx", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.xlsx"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_bytes(&format!("{}/missing.xlsx", server.uri()))
        .await
        .unwrap_err();

    match err {
        HttpError::Status { status, url } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/missing.xlsx"));
        }
        other => panic!("Expected status error, got {other:?}"),
    }
}
