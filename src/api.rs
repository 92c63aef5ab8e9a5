use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::AnalyzeError;
use crate::highlight::HighlightedToken;
use crate::model::Label;
use crate::sentiment::{Analysis, SentimentAnalyzer};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/batch", post(analyze_batch))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeReq {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResp {
    pub label: Label,
    pub model_label: String,
    pub confidence: f64,
    pub clean_text: String,
    pub tokens: Vec<String>,
    pub highlighted: Vec<HighlightedToken>,
    pub highlighted_html: String,
}

impl From<Analysis> for AnalyzeResp {
    fn from(a: Analysis) -> Self {
        let highlighted_html = a.highlighted_html();
        Self {
            label: a.label,
            model_label: a.model_label,
            confidence: a.confidence,
            clean_text: a.clean_text,
            tokens: a.tokens,
            highlighted: a.highlighted,
            highlighted_html,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarningResp {
    pub warning: String,
    pub message: &'static str,
}

impl From<AnalyzeError> for WarningResp {
    fn from(e: AnalyzeError) -> Self {
        Self {
            warning: e.to_string(),
            message: e.user_message(),
        }
    }
}

/// One item of a `/batch` response: either a result or a warning.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Ok(AnalyzeResp),
    Warning(WarningResp),
}

impl From<Result<Analysis, AnalyzeError>> for BatchOutcome {
    fn from(res: Result<Analysis, AnalyzeError>) -> Self {
        match res {
            Ok(a) => BatchOutcome::Ok(a.into()),
            Err(e) => BatchOutcome::Warning(e.into()),
        }
    }
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeResp>, (StatusCode, Json<WarningResp>)> {
    match state.analyzer.analyze(&body.text) {
        Ok(a) => Ok(Json(a.into())),
        Err(e) => Err((StatusCode::UNPROCESSABLE_ENTITY, Json(e.into()))),
    }
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<AnalyzeReq>>,
) -> Json<Vec<BatchOutcome>> {
    let out = items
        .into_iter()
        .map(|it| BatchOutcome::from(state.analyzer.analyze(&it.text)))
        .collect::<Vec<_>>();
    Json(out)
}
