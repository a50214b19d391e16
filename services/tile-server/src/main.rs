//! Map tile server.
//!
//! Answers WMS-style tile queries such as
//! `/tile?width=256&height=256&bbox=-10,-10,10,10` with rendered PNG images.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use renderer::MapRenderer;
use tile_server::config::Args;
use tile_server::server::build_router;
use tile_server::state::AppState;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting tile server");
    args.log_summary();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics exporter initialized");

    let map_config = args.load_map_config()?;
    let renderer = Arc::new(MapRenderer::new(map_config));
    info!(
        srs = %renderer.config().srs,
        graticule = renderer.config().graticule.is_some(),
        "Map renderer ready"
    );
    let state = Arc::new(AppState::new(renderer, args.limits()));

    let app = build_router(state, Some(prometheus_handle));

    let addr = args.listen_addr()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
