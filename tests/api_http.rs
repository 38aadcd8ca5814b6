// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /mentions (empty store, bad params, tolerant client params)
// - POST /ingest/* parameter validation (fails before any network call)

use serde_json::{json, Value as Json};

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use social_listening::api::{create_router, AppState};
use social_listening::config::AppConfig;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses.
fn test_router() -> Router {
    create_router(AppState::new(&AppConfig::default()))
}

async fn json_body(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json body")
}

fn post_json(uri: &str, payload: Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request")
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "ok");
}

#[tokio::test]
async fn mentions_on_empty_store_is_empty_array() {
    let app = test_router();
    let req = Request::builder()
        .uri("/mentions")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn mentions_negative_limit_is_bad_request() {
    let app = test_router();
    let req = Request::builder()
        .uri("/mentions?limit=-1")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json_body(resp).await;
    assert!(v.get("error").is_some(), "error body should carry a message");
}

#[tokio::test]
async fn mentions_negative_offset_is_bad_request() {
    let app = test_router();
    let req = Request::builder()
        .uri("/mentions?offset=-3")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mentions_unknown_source_is_bad_request() {
    let app = test_router();
    let req = Request::builder()
        .uri("/mentions?source=hackernews")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mentions_tolerates_undefined_client_params() {
    let app = test_router();
    let req = Request::builder()
        .uri("/mentions?query=undefined&source=null")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn masto_search_with_empty_instance_is_rejected_before_network() {
    let app = test_router();
    let resp = app
        .oneshot(post_json(
            "/ingest/masto-search",
            json!({"instance": "", "query": "rust"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json_body(resp).await;
    assert!(v["error"].as_str().unwrap().contains("instance"));
}

#[tokio::test]
async fn masto_search_with_empty_query_is_rejected() {
    let app = test_router();
    let resp = app
        .oneshot(post_json(
            "/ingest/masto-search",
            json!({"instance": "mastodon.social", "query": "  "}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rss_ingest_with_relative_url_is_rejected() {
    let app = test_router();
    let resp = app
        .oneshot(post_json("/ingest/rss", json!({"url": "feeds/example.xml"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hn_search_with_zero_cap_is_rejected() {
    let app = test_router();
    let resp = app
        .oneshot(post_json(
            "/ingest/hn-search",
            json!({"query": "rust", "hits_per_page": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reddit_search_with_empty_query_is_rejected() {
    let app = test_router();
    let resp = app
        .oneshot(post_json(
            "/ingest/reddit/search",
            json!({"query": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
