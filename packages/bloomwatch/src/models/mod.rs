pub mod feature;
pub mod layer;
pub mod observation;

// Re-export commonly used types
pub use feature::FeatureDocument;
pub use layer::{
    Layer, LayerId, Marker, Overlay, OverlayStyle, TileLayer, BLOOM_COLOR, BLOOM_POPUP_LABEL,
};
pub use observation::{Coordinate, ObservationRecord};
