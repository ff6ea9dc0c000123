//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::boundary::{self, CheckMethod};
use crate::coord::Coordinates;
use crate::error::Error;
use crate::geocode::Resolution;
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/territory", get(territory_handler))
        .route("/api/weather/:geocode", get(weather_handler))
        .route("/api/forecast/:geocode", get(forecast_handler))
        .route("/api/station", get(station_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

impl ApiError {
    fn not_found(error: String) -> (StatusCode, Json<ApiError>) {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error,
                code: "NOT_FOUND".to_string(),
            }),
        )
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Upstream(_) | Error::Http(_) | Error::Payload(_) => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Coordinates in a query string
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordQuery {
    pub lat: f64,
    pub lon: f64,
}

impl CoordQuery {
    fn validated(self) -> Result<Coordinates, (StatusCode, Json<ApiError>)> {
        let coords = Coordinates::new(self.lat, self.lon);
        coords
            .validate()
            .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::from(e))))?;
        Ok(coords)
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Upstream base URL
    pub api_base_url: String,
    /// Whether the live area lookup is used
    pub live_lookup: bool,
    /// Method answering territory checks
    pub boundary_method: CheckMethod,
    /// Entries in the geocode cache
    pub cached_geocodes: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let boundary_method = if boundary::is_dataset_available() {
        CheckMethod::Polygon
    } else {
        CheckMethod::BoundingBox
    };

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_base_url: state.config.api.base_url.clone(),
        live_lookup: state.client.resolver().live_lookup(),
        boundary_method,
        cached_geocodes: state.client.resolver().store().len().await,
        uptime_secs: state.uptime_secs(),
    })
}

/// Resolve coordinates to a geocode
///
/// GET /api/geocode?lat=..&lon=..
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> ApiResult<Resolution> {
    let coords = query.validated()?;

    state
        .client
        .resolve_detailed(coords.lat, coords.lon)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No geocode for {}", coords)))
}

/// Territory check response
#[derive(Debug, Serialize, Deserialize)]
pub struct TerritoryResponse {
    pub lat: f64,
    pub lon: f64,
    pub inside: bool,
    pub method: CheckMethod,
}

/// Check whether coordinates lie within Brazil
///
/// GET /api/territory?lat=..&lon=..
async fn territory_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> ApiResult<TerritoryResponse> {
    let coords = query.validated()?;
    let check = state.client.check_territory(coords.lat, coords.lon);

    Ok(Json(TerritoryResponse {
        lat: coords.lat,
        lon: coords.lon,
        inside: check.inside,
        method: check.method,
    }))
}

/// Current conditions for a geocode
///
/// GET /api/weather/:geocode
async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Path(geocode): Path<String>,
) -> ApiResult<Value> {
    state
        .client
        .current_weather(&geocode)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No current weather for {}", geocode)))
}

/// Forecast for a geocode
///
/// GET /api/forecast/:geocode
async fn forecast_handler(
    State(state): State<Arc<AppState>>,
    Path(geocode): Path<String>,
) -> ApiResult<Value> {
    state
        .client
        .forecast(&geocode)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No forecast for {}", geocode)))
}

/// Nearest station for coordinates
///
/// GET /api/station?lat=..&lon=..
async fn station_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> ApiResult<Value> {
    let coords = query.validated()?;

    state
        .client
        .nearest_station(coords.lat, coords.lon)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No station near {}", coords)))
}
