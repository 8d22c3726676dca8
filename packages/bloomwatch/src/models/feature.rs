use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON document fetched at runtime.
///
/// Kept opaque: whatever JSON arrives is handed to the browser map's GeoJSON
/// layer untouched. Only well-formedness of the JSON itself is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureDocument(Value);

impl FeatureDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Number of entries in `features`, when the document is a collection.
    pub fn feature_count(&self) -> Option<usize> {
        self.0.get("features")?.as_array().map(Vec::len)
    }
}

impl From<Value> for FeatureDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
