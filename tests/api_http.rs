// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze (result + empty-input warning)
// - POST /batch

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use porsi_sentiment::api::{self, AppState};
use porsi_sentiment::{AppConfig, SentimentAnalyzer};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Same router the binary serves, minus metrics.
fn test_router() -> Router {
    let analyzer =
        SentimentAnalyzer::from_config(&AppConfig::default()).expect("demo artifacts load");
    api::create_router(AppState::new(analyzer))
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK");
}

#[tokio::test]
async fn api_analyze_returns_expected_json_fields() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "Mantap, pendaftaran cepat dan mudah!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Contract checks for UI consumers
    assert_eq!(v["label"], "Positive");
    assert_eq!(v["model_label"], "Positif");
    for key in ["confidence", "clean_text", "tokens", "highlighted", "highlighted_html"] {
        assert!(v.get(key).is_some(), "missing '{key}'");
    }
    let hl = v["highlighted"].as_array().expect("highlighted array");
    assert_eq!(hl.len(), v["tokens"].as_array().unwrap().len());
    assert_eq!(hl[0]["token"], "mantap");
    assert_eq!(hl[0]["category"], "positive");
}

#[tokio::test]
async fn api_analyze_empty_text_is_a_warning() {
    let (status, v) = post_json(test_router(), "/analyze", json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["warning"], "input text is empty");
    assert!(v["message"].as_str().unwrap().contains("Silakan"));
}

#[tokio::test]
async fn api_batch_preserves_order_and_mixes_outcomes() {
    let items = json!([
        { "text": "error terus, aplikasi lemot" },
        { "text": "" },
        { "text": "bagus banget" }
    ]);
    let (status, v) = post_json(test_router(), "/batch", items).await;
    assert_eq!(status, StatusCode::OK);

    let arr = v.as_array().expect("batch response must be an array");
    assert_eq!(arr.len(), 3, "batch response length should match input");
    assert_eq!(arr[0]["label"], "Negative");
    assert!(arr[1].get("warning").is_some());
    assert_eq!(arr[2]["label"], "Positive");
}
