#![allow(clippy::unwrap_used)]

// End-to-end status queries through the real client against a mock proxy.

use homedash_api::{DashDotClient, TransportConfig};
use homedash_core::{CachePolicy, QueryCache, QueryState, StatusQuery};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn status_query(server: &MockServer) -> StatusQuery<DashDotClient> {
    let proxy: Url = server.uri().parse().unwrap();
    let client = DashDotClient::new(proxy, &TransportConfig::default()).unwrap();
    StatusQuery::new(client, QueryCache::new(CachePolicy::default()))
}

#[tokio::test]
async fn concurrent_tiles_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .and(query_param("url", "/info"))
        .and(query_param("base", "http://dash.lan:3001/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "storage": { "layout": [{ "size": 1000 }, { "size": 24 }] },
            "network": { "speedUp": 1.0e8, "speedDown": 9.0e8 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = status_query(&server).await;
    let target: Url = "http://dash.lan:3001".parse().unwrap();
    let (a, b) = tokio::join!(
        query.fetch_status(Some(&target)),
        query.fetch_status(Some(&target))
    );

    let info = a.data().unwrap();
    assert_eq!(info.storage.layout.len(), 2);
    assert!((info.network.speed_down - 9.0e8).abs() < f64::EPSILON);
    assert_eq!(a.data().unwrap(), b.data().unwrap());
}

#[tokio::test]
async fn unconfigured_tile_never_hits_the_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let query = status_query(&server).await;
    let state = query.fetch_status(None).await;
    assert!(state.is_ready());
}

#[tokio::test]
async fn proxy_error_surfaces_as_failed_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let query = status_query(&server).await;
    let target: Url = "http://dash.lan:3001".parse().unwrap();
    let state = query.fetch_status(Some(&target)).await;

    let QueryState::Failed(err) = state else {
        panic!("expected a failed state");
    };
    assert!(err.to_string().contains("502"));
}
