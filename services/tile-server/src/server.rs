//! HTTP router assembly.

use axum::{extract::Extension, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the router.
///
/// Every path not claimed by an operational endpoint is a tile request.
/// `/metrics` is only mounted when a Prometheus recorder is installed.
pub fn build_router(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/metrics", get(handlers::api_metrics_handler));

    if let Some(handle) = prometheus {
        app = app
            .route("/metrics", get(handlers::metrics_handler))
            .layer(Extension(handle));
    }

    app.fallback(handlers::tile_handler)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
