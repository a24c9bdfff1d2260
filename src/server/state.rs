//! Server shared state
//!
//! Holds configuration, the controller handle and the live map surface.

use crate::app::ControllerHandle;
use crate::config::Config;
use crate::error::Result;
use crate::render::MapSurface;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    controller: ControllerHandle,

    /// Surface currently handed to the controller
    surface: RwLock<MapSurface>,

    /// Name of the keyword search backend
    search_backend: String,

    started: Instant,
}

impl ServerState {
    /// Create server state around a running controller
    ///
    /// `surface` must already have been passed to the controller.
    pub fn new(
        config: Config,
        controller: ControllerHandle,
        surface: MapSurface,
        search_backend: impl Into<String>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            controller,
            surface: RwLock::new(surface),
            search_backend: search_backend.into(),
            started: Instant::now(),
        }
    }

    pub fn controller(&self) -> &ControllerHandle {
        &self.controller
    }

    /// The current map surface
    pub async fn surface(&self) -> MapSurface {
        self.surface.read().await.clone()
    }

    /// Replace the map surface with a fresh one at the configured center
    ///
    /// The controller re-runs terrain rendering on the new surface.
    pub async fn recreate_surface(&self) -> Result<MapSurface> {
        let (center, level) = {
            let config = self.config.read().await;
            (config.map_center()?, config.map.level)
        };

        let surface = MapSurface::new(center, level);
        let mut current = self.surface.write().await;
        self.controller.map_ready(surface.clone())?;
        info!("Map surface {} replaced by {}", current.id(), surface.id());
        *current = surface.clone();
        Ok(surface)
    }

    pub fn search_backend(&self) -> &str {
        &self.search_backend
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
