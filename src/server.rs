//! HTTP face of the exporter.
//!
//! Two routes: a small landing page at `/` and the metrics endpoint at the
//! configured path. The metrics handler invokes the collector synchronously
//! — one inbound scrape is one full poll cycle.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use crate::collector::FleetCollector;
use crate::metrics;

/// Content type of the Prometheus text exposition format.
const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The fleet collector driving each scrape.
    pub collector: Arc<FleetCollector>,
    /// Path the metrics endpoint is mounted on (for the landing page link).
    pub metrics_path: String,
}

/// Build the exporter router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let metrics_path = state.metrics_path.clone();
    Router::new()
        .route("/", get(landing))
        .route(&metrics_path, get(serve_metrics))
        .with_state(state)
}

async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>LeoNTP Exporter (Version {version})</title></head>\n\
         <body>\n<h1>LeoNTP Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n",
        version = crate::VERSION,
        path = state.metrics_path,
    ))
}

async fn serve_metrics(State(state): State<AppState>) -> Result<Response, (StatusCode, String)> {
    let samples = state.collector.collect_samples().await;
    let body = metrics::render(&samples).map_err(|err| {
        tracing::error!(error = %err, "metrics rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    })?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body).into_response())
}
