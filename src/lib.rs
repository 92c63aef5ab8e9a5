// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod lexicon;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod sentiment;
pub mod stemmer;
pub mod stopwords;

// ---- Re-exports for stable public API ----
pub use crate::config::{AppConfig, PipelineConfig};
pub use crate::error::{AnalyzeError, ArtifactError, LexiconError};
pub use crate::highlight::{Category, HighlightedToken, Highlighter};
pub use crate::lexicon::Lexicon;
pub use crate::model::{Classifier, FeatureEncoder, FeatureVector, Label};
pub use crate::normalize::{NormalizedText, Normalizer};
pub use crate::sentiment::{Analysis, SentimentAnalyzer};
pub use crate::stemmer::Stemmer;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the tracing subscriber (stderr, `RUST_LOG` aware, `LOG_FORMAT=json`
/// for JSON lines). No-op if a subscriber is already set, e.g. by the runtime.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("porsi_sentiment=info,warn"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };
}

/// Build the full HTTP app from `AppConfig::from_env()`.
/// Artifact or lexicon problems surface here, before any request is served.
pub async fn app() -> anyhow::Result<axum::Router> {
    let cfg = AppConfig::from_env()?;

    // Recorder first, so metric descriptions land in it.
    let metrics = if cfg.server.metrics {
        Some(crate::metrics::global()?)
    } else {
        None
    };

    let analyzer = SentimentAnalyzer::from_config(&cfg)?;
    let mut router = api::create_router(api::AppState::new(analyzer));
    if let Some(m) = metrics {
        router = router.merge(m.router());
    }
    info!(metrics = cfg.server.metrics, "router built");
    Ok(router)
}
