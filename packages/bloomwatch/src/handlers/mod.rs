pub mod map;
pub mod phenology;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use crate::services::surface::SharedSurface;

pub use map::{map_page, map_state};
pub use phenology::classify_vegetation;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "BloomWatch API is healthy!",
        "service": "bloomwatch",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// All routes of the map service.
///
/// `bloom_areas_path` is the file served at `/bloom_areas.geojson`, the
/// same-origin document the overlay loader fetches.
pub fn router(surface: SharedSurface, bloom_areas_path: &str) -> Router {
    Router::new()
        .route("/", get(map_page))
        .route("/api/map", get(map_state))
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/phenology/classify", post(classify_vegetation))
        .route_service("/bloom_areas.geojson", ServeFile::new(bloom_areas_path))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(surface)
}
