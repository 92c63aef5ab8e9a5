//! Sentiment Service — Binary Entrypoint
//! Boots the Axum HTTP server: loads config, lexicon and model artifacts once,
//! then serves `/analyze`, `/batch`, `/health` (and `/metrics` when enabled).

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    porsi_sentiment::init_tracing();

    // Startup failures (missing artifacts, broken lexicon) abort here.
    let router = porsi_sentiment::app().await?;

    Ok(router.into())
}
