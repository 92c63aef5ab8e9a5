use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if a recorder is already installed.
    pub fn init() -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = PrometheusBuilder::new().install_recorder()?;
        describe_metrics();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Attach help text to the pipeline series on the freshly installed recorder.
fn describe_metrics() {
    describe_counter!("sentiment_requests_total", "Analyze calls received.");
    describe_counter!(
        "sentiment_empty_input_total",
        "Analyze calls rejected as empty or whitespace-only."
    );
    describe_counter!(
        "sentiment_predictions_total",
        "Predictions made, labelled by sentiment class."
    );
    describe_histogram!(
        "sentiment_analyze_ms",
        "Pipeline time per analyze call in milliseconds."
    );
}

/// Process-wide recorder; installed on first use so repeated `app()` calls share it.
pub fn global() -> anyhow::Result<&'static Metrics> {
    static METRICS: OnceCell<Metrics> = OnceCell::new();
    METRICS.get_or_try_init(Metrics::init)
}
