use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Coordinate, Layer, LayerId, Marker, Overlay, TileLayer};

/// Default OpenStreetMap tile template
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile servers
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// The one map surface of the session, shared by the point layer, the
/// overlay loader and the HTTP handlers.
pub type SharedSurface = Arc<RwLock<MapSurface>>;

/// Where base map tiles come from
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayer {
    pub id: LayerId,
    #[serde(flatten)]
    pub layer: Layer,
}

/// Viewport plus the layers drawn on it.
///
/// Layers only accumulate; nothing removes them.
#[derive(Debug, Clone, Serialize)]
pub struct MapSurface {
    viewport: Viewport,
    layers: Vec<SurfaceLayer>,
    #[serde(skip)]
    next_id: u64,
}

impl MapSurface {
    /// Create the surface and attach the base tile layer.
    ///
    /// The zoom level is not range-checked. Tile fetch failures happen in the
    /// browser and never reach this type.
    pub fn create(center: Coordinate, zoom: u8, tiles: TileSource) -> Self {
        let mut surface = Self {
            viewport: Viewport { center, zoom },
            layers: Vec::new(),
            next_id: 0,
        };
        surface.add_layer(Layer::Tile(TileLayer {
            url_template: tiles.url_template,
            attribution: tiles.attribution,
        }));
        surface
    }

    pub fn into_shared(self) -> SharedSurface {
        Arc::new(RwLock::new(self))
    }

    /// Attach a layer and return its id
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Attached {} ({})", id, layer_kind(&layer));
        self.layers.push(SurfaceLayer { id, layer });
        id
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layers(&self) -> &[SurfaceLayer] {
        &self.layers
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|l| match &l.layer {
            Layer::Tile(tile) => Some(tile),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.layers.iter().filter_map(|l| match &l.layer {
            Layer::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.layers.iter().filter_map(|l| match &l.layer {
            Layer::Overlay(overlay) => Some(overlay),
            _ => None,
        })
    }
}

fn layer_kind(layer: &Layer) -> &'static str {
    match layer {
        Layer::Tile(_) => "tile",
        Layer::Marker(_) => "marker",
        Layer::Overlay(_) => "overlay",
    }
}
