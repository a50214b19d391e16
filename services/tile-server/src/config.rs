//! Command-line and environment configuration.

use anyhow::{Context, Result};
use clap::Parser;
use renderer::MapConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use wms_common::RenderLimits;

/// Map tile server
#[derive(Parser, Debug, Clone)]
#[command(name = "tile-server")]
#[command(about = "WMS-style map tile HTTP server")]
pub struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "TILE_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TILE_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// YAML map configuration; built-in defaults when omitted
    #[arg(long, env = "TILE_MAP_CONFIG")]
    pub map_config: Option<PathBuf>,

    /// Largest accepted WIDTH in pixels
    #[arg(long, default_value_t = 4096, env = "TILE_MAX_WIDTH")]
    pub max_width: u32,

    /// Largest accepted HEIGHT in pixels
    #[arg(long, default_value_t = 4096, env = "TILE_MAX_HEIGHT")]
    pub max_height: u32,
}

impl Args {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen))
    }

    pub fn limits(&self) -> RenderLimits {
        RenderLimits {
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Load the map configuration named on the command line, if any.
    pub fn load_map_config(&self) -> Result<MapConfig> {
        match &self.map_config {
            Some(path) => MapConfig::load(path)
                .with_context(|| format!("Failed to load map config: {}", path.display())),
            None => {
                warn!("No map configuration given, using built-in defaults");
                Ok(MapConfig::default())
            }
        }
    }

    /// Log the effective configuration.
    pub fn log_summary(&self) {
        info!(
            listen = %self.listen,
            max_width = self.max_width,
            max_height = self.max_height,
            map_config = ?self.map_config,
            "Tile server configuration"
        );
    }
}
