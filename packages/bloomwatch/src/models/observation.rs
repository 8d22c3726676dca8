use serde::{Deserialize, Serialize};

/// A point on the map. Ranges are not checked; the browser map decides what
/// to do with out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One citizen-science observation, as preloaded at startup.
///
/// The wire form is flat: `{observer, notes, lat, lng}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub observer: String,
    pub notes: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl ObservationRecord {
    pub fn new(observer: impl Into<String>, notes: impl Into<String>, location: Coordinate) -> Self {
        Self {
            observer: observer.into(),
            notes: notes.into(),
            location,
        }
    }
}
