//! HTTP request handlers.
//!
//! - `tile`: the tile pipeline, mounted as the router fallback
//! - `health`: liveness and metrics endpoints

pub mod health;
pub mod tile;

pub use health::{api_metrics_handler, health_handler, metrics_handler};
pub use tile::tile_handler;
