use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::libraries::phenology::{
    calculate_ndvi, classify_vegetation_state, mean_positive_ndvi, VegetationState,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub red: Vec<f32>,
    pub nir: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub state: VegetationState,
    pub mean_ndvi: Option<f32>,
    pub pixels: usize,
}

/// Classify a scene from its red and near-infrared band values
pub async fn classify_vegetation(
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, (StatusCode, Json<serde_json::Value>)> {
    let ndvi = calculate_ndvi(&request.red, &request.nir).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
    })?;

    let state = classify_vegetation_state(&ndvi);
    debug!("Classified {} pixels as {}", ndvi.len(), state);

    Ok(Json(ClassifyResponse {
        state,
        mean_ndvi: mean_positive_ndvi(&ndvi),
        pixels: ndvi.len(),
    }))
}
