use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::{libraries::leaflet::render_page, services::surface::SharedSurface};

/// The interactive map, drawn from the surface as it is right now
pub async fn map_page(State(surface): State<SharedSurface>) -> Response {
    let surface = surface.read().await;

    match render_page(&surface) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render map page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render map").into_response()
        }
    }
}

/// Viewport and layers as JSON
pub async fn map_state(State(surface): State<SharedSurface>) -> Response {
    let surface = surface.read().await;
    Json(&*surface).into_response()
}
