use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use bloomwatch::{
    handlers::router,
    models::{Coordinate, ObservationRecord},
    services::{
        overlay::{spawn_overlay_loader, HttpFeatureSource, LoadOutcome, TracingSink, BLOOM_AREAS_SOURCE},
        points::{render_points, PopupText},
        surface::{MapSurface, SharedSurface, TileSource},
    },
};

const BLOOM_AREAS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/bloom_areas.geojson");

fn create_surface(points: &[ObservationRecord]) -> SharedSurface {
    let mut surface =
        MapSurface::create(Coordinate::new(35.15, -119.75), 10, TileSource::default());
    render_points(&mut surface, points, PopupText::Verbatim);
    surface.into_shared()
}

fn sample_points() -> Vec<ObservationRecord> {
    vec![
        ObservationRecord::new("Maria", "Poppies in full bloom", Coordinate::new(35.19, -119.78)),
        ObservationRecord::new("Dev", "Lupine, 40% cover", Coordinate::new(35.11, -119.64)),
    ]
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new(router(create_surface(&[]), BLOOM_AREAS_PATH)).unwrap();

    for path in ["/health", "/api/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "BloomWatch API is healthy!");
        assert_eq!(body["service"], "bloomwatch");
    }
}

#[tokio::test]
async fn test_map_state_lists_tile_and_markers() {
    let server = TestServer::new(router(create_surface(&sample_points()), BLOOM_AREAS_PATH)).unwrap();

    let body: Value = server.get("/api/map").await.json();

    assert_eq!(body["viewport"]["center"], json!({"lat": 35.15, "lng": -119.75}));
    assert_eq!(body["viewport"]["zoom"], 10);

    let layers = body["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0]["kind"], "tile");
    assert_eq!(layers[1]["kind"], "marker");
    assert_eq!(
        layers[1]["popup"],
        "<b>Observer:</b> Maria<br><b>Notes:</b> Poppies in full bloom"
    );
    assert_eq!(layers[2]["location"], json!({"lat": 35.11, "lng": -119.64}));
}

#[tokio::test]
async fn test_map_page_is_html() {
    let server = TestServer::new(router(create_surface(&sample_points()), BLOOM_AREAS_PATH)).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();

    let page = response.text();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("L.map('map')"));
    assert!(page.contains("Poppies in full bloom"));
}

#[tokio::test]
async fn test_serves_bloom_areas_file() {
    let server = TestServer::new(router(create_surface(&[]), BLOOM_AREAS_PATH)).unwrap();

    let response = server.get("/bloom_areas.geojson").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["type"], "FeatureCollection");
}

#[tokio::test]
async fn test_classify_vegetation() {
    let server = TestServer::new(router(create_surface(&[]), BLOOM_AREAS_PATH)).unwrap();

    let body: Value = server
        .post("/api/phenology/classify")
        .json(&json!({"red": [0.05, 0.1, 0.0], "nir": [0.45, 0.5, 0.0]}))
        .await
        .json();

    assert_eq!(body["state"], "High Vegetation");
    assert_eq!(body["pixels"], 3);
    assert!(body["mean_ndvi"].as_f64().unwrap() > 0.4);
}

#[tokio::test]
async fn test_classify_rejects_mismatched_bands() {
    let server = TestServer::new(router(create_surface(&[]), BLOOM_AREAS_PATH)).unwrap();

    let response = server
        .post("/api/phenology/classify")
        .json(&json!({"red": [0.1, 0.2], "nir": [0.3]}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("differ in length"));
}

#[tokio::test]
async fn test_overlay_loaded_from_own_origin_shows_on_map() {
    let surface = create_surface(&sample_points());
    let app = router(surface.clone(), BLOOM_AREAS_PATH);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpFeatureSource::new(&format!("http://{}/", addr)).unwrap();
    let outcome = spawn_overlay_loader(surface.clone(), source, BLOOM_AREAS_SOURCE, TracingSink)
        .await
        .unwrap();
    assert!(matches!(outcome, LoadOutcome::Attached(_)));

    let server = TestServer::new(router(surface, BLOOM_AREAS_PATH)).unwrap();
    let body: Value = server.get("/api/map").await.json();
    let layers = body["layers"].as_array().unwrap();

    assert_eq!(layers.len(), 4);
    assert_eq!(layers[3]["kind"], "overlay");
    assert_eq!(layers[3]["popup"], "Satellite Detected Bloom Area");
    assert_eq!(layers[3]["style"], json!({"color": "#00FF00", "weight": 1, "fillOpacity": 0.5}));
    assert_eq!(layers[3]["data"]["features"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_classify_skips_infinite_pixels() {
    let server = TestServer::new(router(create_surface(&[]), BLOOM_AREAS_PATH)).unwrap();

    // nir + red == 0 yields an infinite NDVI for that pixel
    let body: Value = server
        .post("/api/phenology/classify")
        .json(&json!({"red": [-0.1], "nir": [0.1]}))
        .await
        .json();

    assert_eq!(body["state"], "Low Vegetation");
    assert_eq!(body["mean_ndvi"], Value::Null);
    assert_eq!(body["pixels"], 1);
}
