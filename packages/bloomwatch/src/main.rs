use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloomwatch::{
    config::Config,
    handlers,
    models::Coordinate,
    services::{
        overlay::{spawn_overlay_loader, HttpFeatureSource, TracingSink},
        points::{load_points, render_points, PopupText},
        surface::{MapSurface, TileSource},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloomwatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting BloomWatch map service");

    let mut surface = MapSurface::create(
        Coordinate::new(config.center_lat, config.center_lng),
        config.zoom,
        TileSource {
            url_template: config.tile_url.clone(),
            attribution: config.tile_attribution.clone(),
        },
    );

    let points = load_points(&config.points_path)?;
    let popup_text = if config.escape_popups {
        PopupText::Escaped
    } else {
        PopupText::Verbatim
    };
    render_points(&mut surface, &points, popup_text);

    let surface = surface.into_shared();
    let app = handlers::router(surface.clone(), &config.bloom_areas_path);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    // The overlay is fetched from our own origin, so start it once the
    // listener is bound. Its outcome is not awaited.
    let source = HttpFeatureSource::new(&config.base_url())
        .context("Invalid public base URL")?;
    let _ = spawn_overlay_loader(surface, source, config.overlay_source.clone(), TracingSink);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    info!("Shutting down...");
    Ok(())
}
