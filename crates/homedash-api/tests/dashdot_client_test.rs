#![allow(clippy::unwrap_used)]
// Integration tests for `DashDotClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use std::time::Duration;

use homedash_api::{DashDotClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashDotClient) {
    let server = MockServer::start().await;
    let proxy_url = Url::parse(&server.uri()).unwrap();
    let client = DashDotClient::with_client(reqwest::Client::new(), proxy_url);
    (server, client)
}

fn target() -> Url {
    Url::parse("http://dash.lan:3001").unwrap()
}

// ── Info tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_info_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .and(query_param("url", "/info"))
        .and(query_param("base", "http://dash.lan:3001/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "storage": { "layout": [ { "size": 1000 }, { "size": 24 } ] },
            "network": { "speedUp": 250.0, "speedDown": 1000.0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.info(&target()).await.unwrap();

    assert_eq!(info.storage.layout.len(), 2);
    assert_eq!(info.storage.layout[1].size, 24);
    assert!((info.network.speed_down - 1000.0).abs() < f64::EPSILON);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_info_upstream_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unreachable"))
        .mount(&server)
        .await;

    let result = client.info(&target()).await;

    match result {
        Err(Error::Status { status, ref body }) => {
            assert_eq!(status, 502);
            assert!(body.contains("upstream"), "unexpected body: {body}");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_info_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.info(&target()).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_info_timeout_reports_configured_limit() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_secs(1));
    let client = DashDotClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client.info(&target()).await.unwrap_err();

    assert!(
        matches!(err, Error::Timeout { timeout_secs: Some(1) }),
        "expected Timeout error, got: {err:?}"
    );
    assert_eq!(err.to_string(), "Request timed out after 1s");
}
