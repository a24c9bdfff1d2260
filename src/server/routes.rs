//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::app::state::Snapshot;
use crate::error::Error;
use crate::render::{legend, LegendEntry, SurfaceView};
use crate::selection::SelectedLocation;
use crate::server::state::ServerState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router(state: Arc<ServerState>) -> Router {
    // Try relative to cwd first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "static".to_string())
    };

    Router::new()
        .route("/api/input", post(input_handler))
        .route("/api/state", get(state_handler))
        .route("/api/select", post(select_handler))
        .route("/api/markers", get(markers_handler))
        .route("/api/map", post(map_handler))
        .route("/api/legend", get(legend_handler))
        .route("/api/status", get(status_handler))
        .fallback_service(ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn not_found(error: String) -> Self {
        Self {
            error,
            code: "NOT_FOUND".to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_COORDINATES" | "CONFIG_ERROR" => StatusCode::BAD_REQUEST,
            "CONTROLLER_ERROR" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Controller(_) => "CONTROLLER_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Search box input
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    #[serde(default)]
    pub text: String,
}

/// Report new search box text
///
/// POST /api/input
async fn input_handler(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<InputRequest>,
) -> Result<StatusCode, ApiError> {
    state.controller().input(req.text)?;
    Ok(StatusCode::ACCEPTED)
}

/// Current application state
///
/// GET /api/state
async fn state_handler(State(state): State<Arc<ServerState>>) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(state.controller().snapshot().await?))
}

/// Candidate selection request
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
}

/// Select a candidate by its position in the current list
///
/// POST /api/select
async fn select_handler(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SelectedLocation>, ApiError> {
    state
        .controller()
        .select(req.index)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No candidate at index {}", req.index)))
}

/// Markers and pans on the current surface
///
/// GET /api/markers
async fn markers_handler(State(state): State<Arc<ServerState>>) -> Json<SurfaceView> {
    Json(state.surface().await.view())
}

/// Recreate the map surface
///
/// POST /api/map
async fn map_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<(StatusCode, Json<SurfaceView>), ApiError> {
    let surface = state.recreate_surface().await?;
    Ok((StatusCode::CREATED, Json(surface.view())))
}

/// Legend response
#[derive(Debug, Serialize, Deserialize)]
pub struct LegendResponse {
    pub entries: Vec<LegendEntry>,
}

/// Marker legend
///
/// GET /api/legend
async fn legend_handler() -> Json<LegendResponse> {
    Json(LegendResponse { entries: legend() })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Keyword search backend
    pub search_backend: String,
    /// Records in each dataset, when loaded
    pub hazard_records: Option<usize>,
    pub peak_records: Option<usize>,
    pub terrain_renders: u64,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status
///
/// GET /api/status
async fn status_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.controller().snapshot().await?;

    Ok(Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        search_backend: state.search_backend().to_string(),
        hazard_records: snapshot.hazard_records,
        peak_records: snapshot.peak_records,
        terrain_renders: snapshot.counters.terrain_renders,
        uptime_secs: state.uptime_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Controller, ControllerHandle};
    use crate::config::Config;
    use crate::geo::GeoPoint;
    use crate::render::{IconKind, MapSurface};
    use crate::search::tests::{candidate, MockSearch};
    use crate::terrain::{RawHazardRecord, RawPeakRecord};
    use crate::tourism::tests::MockTourism;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn create_test_state() -> (Arc<ServerState>, ControllerHandle) {
        let search = MockSearch::returning(vec![
            candidate("Trailhead", 33.45, 126.57),
            candidate("Summit Hut", 33.36, 126.53),
        ]);
        let (controller, handle) = Controller::new(search, MockTourism::default());
        controller.spawn();

        let config = Config::default();
        let surface = MapSurface::new(config.map_center().unwrap(), config.map.level);
        handle.map_ready(surface.clone()).unwrap();

        let state = Arc::new(ServerState::new(config, handle.clone(), surface, "mock"));
        (state, handle)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn wait_for_candidates(handle: &ControllerHandle, count: usize) {
        for _ in 0..200 {
            if handle.snapshot().await.unwrap().candidates.len() == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("candidates never arrived");
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let (state, _) = create_test_state();
        let app = create_router(state);

        let response = app.oneshot(get("/api/status")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status: StatusResponse = body_json(response).await;
        assert!(status.running);
        assert_eq!(status.search_backend, "mock");
        assert_eq!(status.hazard_records, None);
        assert_eq!(status.terrain_renders, 0);
    }

    #[tokio::test]
    async fn test_input_then_select() {
        let (state, handle) = create_test_state();
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(post_json("/api/input", serde_json::json!({ "text": "trail" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        wait_for_candidates(&handle, 2).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/select", serde_json::json!({ "index": 1 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let selected: SelectedLocation = body_json(response).await;
        assert_eq!(selected.location, GeoPoint::new(33.36, 126.53).unwrap());

        let response = app.oneshot(get("/api/markers")).await.unwrap();
        let view: SurfaceView = body_json(response).await;
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].icon, IconKind::SelectedPlace);
        assert_eq!(view.markers[0].label, "Summit Hut");
        assert_eq!(view.center, selected.location);
    }

    #[tokio::test]
    async fn test_select_missing_index() {
        let (state, _) = create_test_state();
        let app = create_router(state);

        let response = app
            .oneshot(post_json("/api/select", serde_json::json!({ "index": 4 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_state_endpoint() {
        let (state, handle) = create_test_state();
        let app = create_router(state);

        handle.input("   ").unwrap();
        let response = app.oneshot(get("/api/state")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot: serde_json::Value = body_json(response).await;
        assert_eq!(snapshot["keyword"], "   ");
        assert_eq!(snapshot["candidates"].as_array().unwrap().len(), 0);
        assert_eq!(snapshot["map_ready"], true);
    }

    #[tokio::test]
    async fn test_recreate_map_rerenders_terrain() {
        let (state, handle) = create_test_state();
        let app = create_router(state.clone());
        let first = state.surface().await;

        handle
            .hazards_loaded(vec![RawHazardRecord {
                lat: 33.4,
                lot: 126.5,
                name: "Ridge".to_string(),
                type_code: "DANGER".to_string(),
            }])
            .unwrap();
        handle
            .peaks_loaded(vec![RawPeakRecord {
                lat: 33.5,
                lot: 126.6,
                name: "Peak1".to_string(),
            }])
            .unwrap();
        handle.snapshot().await.unwrap();
        assert_eq!(first.markers().len(), 2);

        let response = app.clone().oneshot(post_json("/api/map", serde_json::json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let view: SurfaceView = body_json(response).await;
        assert_ne!(view.id, first.id());

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.counters.terrain_renders, 2);

        let response = app.oneshot(get("/api/markers")).await.unwrap();
        let view: SurfaceView = body_json(response).await;
        assert_eq!(view.markers.len(), 2);
        assert_eq!(first.markers().len(), 2);
    }

    #[tokio::test]
    async fn test_legend_endpoint() {
        let (state, _) = create_test_state();
        let app = create_router(state);

        let response = app.oneshot(get("/api/legend")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let legend: LegendResponse = body_json(response).await;
        assert_eq!(legend.entries.len(), 4);
    }

    #[tokio::test]
    async fn test_controller_gone() {
        let (state, handle) = create_test_state();
        let app = create_router(state);
        handle.shutdown().unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let response = app.oneshot(get("/api/state")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
