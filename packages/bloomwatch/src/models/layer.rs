use serde::{Deserialize, Serialize};

use super::{Coordinate, FeatureDocument};

/// Fill color for satellite-detected bloom areas
pub const BLOOM_COLOR: &str = "#00FF00";

/// Popup label attached to every bloom area overlay
pub const BLOOM_POPUP_LABEL: &str = "Satellite Detected Bloom Area";

/// Identifier handed out by the map surface when a layer is attached.
/// Ids increase in attach order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub location: Coordinate,
    /// Popup HTML bound to the marker
    pub popup: String,
}

/// Path options for a GeoJSON overlay, named the way the browser map expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub color: String,
    pub weight: u32,
    pub fill_opacity: f64,
}

impl OverlayStyle {
    pub fn bloom() -> Self {
        Self {
            color: BLOOM_COLOR.to_string(),
            weight: 1,
            fill_opacity: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub data: FeatureDocument,
    pub style: OverlayStyle,
    pub popup: String,
}

impl Overlay {
    /// Bloom area overlay with the fixed style and label
    pub fn bloom_area(data: FeatureDocument) -> Self {
        Self {
            data,
            style: OverlayStyle::bloom(),
            popup: BLOOM_POPUP_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Tile(TileLayer),
    Marker(Marker),
    Overlay(Overlay),
}
