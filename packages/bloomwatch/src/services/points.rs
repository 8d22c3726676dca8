use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Layer, Marker, ObservationRecord};
use crate::services::surface::MapSurface;

/// How observer/notes text is placed into popup HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupText {
    /// Interpolate the fields as-is
    #[default]
    Verbatim,
    /// HTML-escape the fields first
    Escaped,
}

/// Popup HTML for one observation:
/// `<b>Observer:</b> {observer}<br><b>Notes:</b> {notes}`
pub fn popup_content(record: &ObservationRecord, text: PopupText) -> String {
    let (observer, notes) = match text {
        PopupText::Verbatim => (record.observer.clone(), record.notes.clone()),
        PopupText::Escaped => (escape_html(&record.observer), escape_html(&record.notes)),
    };
    format!("<b>Observer:</b> {}<br><b>Notes:</b> {}", observer, notes)
}

/// Attach one marker with a popup per record, in input order.
/// Returns how many markers were attached.
pub fn render_points(surface: &mut MapSurface, points: &[ObservationRecord], text: PopupText) -> usize {
    for record in points {
        surface.add_layer(Layer::Marker(Marker {
            location: record.location,
            popup: popup_content(record, text),
        }));
    }

    tracing::info!("Rendered {} observation markers", points.len());
    points.len()
}

/// Read the preloaded observation array (`[{observer, notes, lat, lng}]`)
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<ObservationRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read observations from {}", path.display()))?;

    let points: Vec<ObservationRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse observations in {}", path.display()))?;

    tracing::debug!("Loaded {} observations from {}", points.len(), path.display());
    Ok(points)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
