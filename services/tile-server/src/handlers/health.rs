//! Health check and metrics handlers.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::state::AppState;

/// GET /health - Liveness check
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /metrics - Prometheus metrics endpoint
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// GET /api/metrics - JSON snapshot of request and render counters
pub async fn api_metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}
