// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use porsi_sentiment::api::{self, AppState};
use porsi_sentiment::{AppConfig, SentimentAnalyzer};

#[tokio::test]
async fn metrics_endpoint_contains_pipeline_series() {
    // Analyzer built before the recorder exists; descriptions must still show up.
    let analyzer = SentimentAnalyzer::from_config(&AppConfig::default()).expect("artifacts");
    let metrics = porsi_sentiment::metrics::global().expect("install recorder");

    analyzer.analyze("bagus banget").expect("positive review");
    assert!(analyzer.analyze("   ").is_err());

    let app = api::create_router(AppState::new(analyzer)).merge(metrics.router());
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "sentiment_requests_total",
        "sentiment_empty_input_total",
        "sentiment_predictions_total{label=\"Positive\"}",
        "sentiment_analyze_ms",
        "# HELP sentiment_requests_total",
        "# HELP sentiment_analyze_ms",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
