//! HTTP server for trail-lens
//!
//! Wires the controller to its real collaborators and exposes it over a
//! REST API.

pub mod routes;
pub mod state;

use crate::app::{Controller, ControllerHandle};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::get_searcher;
use crate::render::MapSurface;
use crate::terrain::dataset::{DatasetLoader, DatasetSource};
use crate::tourism::korservice::KorServiceClient;
use routes::create_router;
use state::ServerState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the controller with configured backends and feed it its inputs
///
/// Datasets load in the background; the initial map surface is handed over
/// immediately.
pub fn start_controller(config: &Config) -> Result<(ControllerHandle, MapSurface, &'static str)> {
    let searcher = get_searcher(config)?;
    let backend = searcher.name();
    let tourism = KorServiceClient::from_config(config);

    let (controller, handle) = Controller::new(searcher, tourism);
    controller.spawn();

    handle.load_datasets(
        DatasetLoader::new(),
        DatasetSource::parse(&config.datasets.hazard_areas),
        DatasetSource::parse(&config.datasets.peaks),
    );

    let surface = MapSurface::new(config.map_center()?, config.map.level);
    handle.map_ready(surface.clone())?;

    Ok((handle, surface, backend))
}

/// Start the HTTP server
///
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config).await
}

/// Start the HTTP server with a specific address
pub async fn run_on(addr: &str, config: Config) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let (handle, surface, backend) = start_controller(&config)?;
    let state = Arc::new(ServerState::new(config, handle.clone(), surface, backend));
    let app = create_router(state);

    info!("Starting server on {} (search backend: {})", addr, backend);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    let served = axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)));

    let _ = handle.shutdown();
    served
}
