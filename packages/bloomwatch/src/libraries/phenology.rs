use serde::{Deserialize, Serialize};

/// Mean NDVI above which a scene counts as high vegetation
pub const NDVI_THRESHOLD: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhenologyError {
    #[error("red and NIR bands differ in length ({red} vs {nir})")]
    BandLengthMismatch { red: usize, nir: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VegetationState {
    #[serde(rename = "High Vegetation")]
    HighVegetation,
    #[serde(rename = "Low Vegetation")]
    LowVegetation,
}

impl std::fmt::Display for VegetationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VegetationState::HighVegetation => write!(f, "High Vegetation"),
            VegetationState::LowVegetation => write!(f, "Low Vegetation"),
        }
    }
}

/// Per-pixel NDVI, `(nir - red) / (nir + red)`.
///
/// 0/0 pixels come out as 0 instead of NaN.
pub fn calculate_ndvi(red: &[f32], nir: &[f32]) -> Result<Vec<f32>, PhenologyError> {
    if red.len() != nir.len() {
        return Err(PhenologyError::BandLengthMismatch {
            red: red.len(),
            nir: nir.len(),
        });
    }

    Ok(red
        .iter()
        .zip(nir)
        .map(|(&r, &n)| {
            let ndvi = (n - r) / (n + r);
            if ndvi.is_nan() {
                0.0
            } else {
                ndvi
            }
        })
        .collect())
}

/// Mean over the positive finite pixels only, `None` when there are none.
/// Infinite pixels (`nir + red == 0` with `nir != red`) are skipped.
pub fn mean_positive_ndvi(ndvi: &[f32]) -> Option<f32> {
    let (sum, count) = ndvi
        .iter()
        .filter(|&&v| v.is_finite() && v > 0.0)
        .fold((0.0f64, 0usize), |(sum, count), &v| (sum + v as f64, count + 1));

    (count > 0).then(|| (sum / count as f64) as f32)
}

/// Classify a scene by its mean positive NDVI.
/// A scene with no positive pixels is low vegetation.
pub fn classify_vegetation_state(ndvi: &[f32]) -> VegetationState {
    match mean_positive_ndvi(ndvi) {
        Some(mean) if mean > NDVI_THRESHOLD => VegetationState::HighVegetation,
        _ => VegetationState::LowVegetation,
    }
}
