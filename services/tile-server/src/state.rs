//! Application state and shared resources.

use std::sync::Arc;

use renderer::Renderer;
use wms_common::RenderLimits;

use crate::metrics::MetricsCollector;

/// Shared application state.
///
/// The renderer is immutable and shared by every request; per-request view
/// state never lives here.
pub struct AppState {
    pub renderer: Arc<dyn Renderer>,
    pub limits: RenderLimits,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    pub fn new(renderer: Arc<dyn Renderer>, limits: RenderLimits) -> Self {
        Self {
            renderer,
            limits,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }
}
