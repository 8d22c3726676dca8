use serde::Deserialize;

use crate::services::overlay::BLOOM_AREAS_SOURCE;
use crate::services::surface::{OSM_ATTRIBUTION, OSM_TILE_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Initial map view (Carrizo Plain)
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    // Preloaded citizen observations
    #[serde(default = "default_points_path")]
    pub points_path: String,

    // File served at /bloom_areas.geojson
    #[serde(default = "default_bloom_areas_path")]
    pub bloom_areas_path: String,

    // Reference the overlay loader fetches, relative to public_base_url
    #[serde(default = "default_overlay_source")]
    pub overlay_source: String,

    // Origin the map is served from (defaults to the local listener)
    pub public_base_url: Option<String>,

    // HTML-escape observer/notes in marker popups
    #[serde(default)]
    pub escape_popups: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/", self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            tile_attribution: default_tile_attribution(),
            points_path: default_points_path(),
            bloom_areas_path: default_bloom_areas_path(),
            overlay_source: default_overlay_source(),
            public_base_url: None,
            escape_popups: false,
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_center_lat() -> f64 {
    35.15
}

fn default_center_lng() -> f64 {
    -119.75
}

fn default_zoom() -> u8 {
    10
}

fn default_tile_url() -> String {
    OSM_TILE_URL.to_string()
}

fn default_tile_attribution() -> String {
    OSM_ATTRIBUTION.to_string()
}

fn default_points_path() -> String {
    "data/points.json".to_string()
}

fn default_bloom_areas_path() -> String {
    "data/bloom_areas.geojson".to_string()
}

fn default_overlay_source() -> String {
    BLOOM_AREAS_SOURCE.to_string()
}
