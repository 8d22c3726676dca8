use crate::services::surface::MapSurface;

const LEAFLET_VERSION: &str = "1.9.4";

/// Render the surface as a standalone Leaflet page.
///
/// The surface is embedded as JSON and drawn client-side: the tile layer,
/// one marker per observation and every overlay attached so far. Popup
/// strings are handed to Leaflet as HTML.
pub fn render_page(surface: &MapSurface) -> Result<String, serde_json::Error> {
    let state = script_safe(&serde_json::to_string(surface)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>BloomWatch</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
  <style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
  <div id="map"></div>
  <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
  <script>
    const surface = {state};
    const map = L.map('map').setView(
      [surface.viewport.center.lat, surface.viewport.center.lng],
      surface.viewport.zoom
    );
    for (const layer of surface.layers) {{
      switch (layer.kind) {{
        case 'tile':
          L.tileLayer(layer.url_template, {{ attribution: layer.attribution }}).addTo(map);
          break;
        case 'marker':
          L.marker([layer.location.lat, layer.location.lng]).addTo(map).bindPopup(layer.popup);
          break;
        case 'overlay':
          L.geoJSON(layer.data, {{ style: layer.style }}).bindPopup(layer.popup).addTo(map);
          break;
      }}
    }}
  </script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        state = state,
    ))
}

/// Keep embedded JSON from changing how the surrounding `<script>` element
/// is tokenized. The escapes are only valid inside JSON strings, which is the
/// only place these characters can appear in serializer output.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
