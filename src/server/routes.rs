//! HTTP API routes
//!
//! The three geocoder endpoints always answer 200 with their envelope,
//! whatever happened upstream.

use crate::error::Error;
use crate::geocode::{
    ForwardGeocodeResponse, GeocodeRequest, GeocodingProvider, PlaceResponse,
    SuggestionsResponse,
};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router<P: GeocodingProvider + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        .route("/api/geocode", get(forward_geocode_handler::<P>))
        .route("/api/suggestions", get(suggestions_handler::<P>))
        .route("/api/place", get(place_handler::<P>))
        .route("/api/map", get(map_handler::<P>))
        .route("/api/status", get(status_handler::<P>))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Provider(_) => "PROVIDER_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Forward geocode
///
/// GET /api/geocode?query=...&index=...
async fn forward_geocode_handler<P: GeocodingProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(request): Query<GeocodeRequest>,
) -> Json<ForwardGeocodeResponse> {
    Json(state.adapter.forward_geocode(&request).await)
}

/// Autosuggest
///
/// GET /api/suggestions?query=...&index=...
async fn suggestions_handler<P: GeocodingProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(request): Query<GeocodeRequest>,
) -> Json<SuggestionsResponse> {
    Json(state.adapter.get_suggestions(&request).await)
}

/// Resolve a suggestion; `query` carries the place id
///
/// GET /api/place?query=...&index=...
async fn place_handler<P: GeocodingProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(request): Query<GeocodeRequest>,
) -> Json<PlaceResponse> {
    Json(state.adapter.resolve_suggestion(&request).await)
}

/// Map initialisation settings
#[derive(Debug, Serialize, Deserialize)]
pub struct MapResponse {
    /// Style descriptor URL
    pub style: String,
    /// Initial center as [longitude, latitude]
    pub center: [f64; 2],
    /// Initial zoom
    pub zoom: f64,
}

/// Settings the page needs to construct its map view
///
/// GET /api/map
async fn map_handler<P: GeocodingProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<MapResponse>, ApiError> {
    let config = &state.config;

    Ok(Json(MapResponse {
        style: config.map_style_url()?,
        center: config.map.center,
        zoom: config.map.zoom,
    }))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Provider region
    pub region: String,
    /// Index used when a request names none
    pub default_index: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<P: GeocodingProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        region: state.config.provider.region.clone(),
        default_index: state.adapter.default_index().to_string(),
    })
}
