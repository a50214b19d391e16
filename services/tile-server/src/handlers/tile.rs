//! Tile request handler.

use axum::{
    extract::Extension,
    http::Uri,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use wms_common::WmsError;

use crate::dispatch::{error_reply, handle_request};
use crate::state::AppState;

/// Run the tile pipeline on the raw request target.
///
/// Rendering is synchronous and CPU-bound, so the pipeline runs on the
/// blocking pool rather than on an async worker.
pub async fn tile_handler(Extension(state): Extension<Arc<AppState>>, uri: Uri) -> Response {
    let raw_target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let worker_state = state.clone();
    let reply = tokio::task::spawn_blocking(move || {
        handle_request(
            &raw_target,
            worker_state.renderer.as_ref(),
            &worker_state.limits,
            &worker_state.metrics,
        )
    })
    .await
    .unwrap_or_else(|e| {
        error_reply(&WmsError::InternalError(format!(
            "tile worker did not complete: {}",
            e
        )))
    });

    state.metrics.record_reply(&reply);
    reply.into_response()
}
