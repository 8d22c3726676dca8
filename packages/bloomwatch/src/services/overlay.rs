use reqwest::{StatusCode, Url};
use std::error::Error;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::models::{FeatureDocument, Layer, LayerId, Overlay};
use crate::services::surface::SharedSurface;

/// Same-origin path of the satellite bloom area document
pub const BLOOM_AREAS_SOURCE: &str = "./bloom_areas.geojson";

/// Why a bloom area overlay did not make it onto the map.
///
/// The variants are kept apart here; they all end up in the same diagnostic
/// sink and none of them is ever shown to the map user.
#[derive(Debug, thiserror::Error)]
pub enum OverlayLoadError {
    #[error("invalid overlay source {0}")]
    InvalidSource(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    #[error("malformed GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where overlay documents are fetched from
pub trait FeatureSource: Send + Sync + 'static {
    /// Fetch the raw body behind `source_ref`.
    /// A non-success response is an error, not a body.
    fn fetch(
        &self,
        source_ref: &str,
    ) -> impl Future<Output = Result<Vec<u8>, OverlayLoadError>> + Send;
}

/// Fetches documents over HTTP, resolving relative references against the
/// origin that serves the map.
#[derive(Debug, Clone)]
pub struct HttpFeatureSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpFeatureSource {
    pub fn new(base_url: &str) -> Result<Self, OverlayLoadError> {
        let base = Url::parse(base_url)
            .map_err(|e| OverlayLoadError::InvalidSource(format!("{}: {}", base_url, e)))?;

        // No request timeout: the fetch runs until it succeeds or fails.
        let client = reqwest::Client::builder()
            .user_agent(concat!("bloomwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn resolve(&self, source_ref: &str) -> Result<Url, OverlayLoadError> {
        self.base
            .join(source_ref)
            .map_err(|e| OverlayLoadError::InvalidSource(format!("{}: {}", source_ref, e)))
    }
}

impl FeatureSource for HttpFeatureSource {
    async fn fetch(&self, source_ref: &str) -> Result<Vec<u8>, OverlayLoadError> {
        let url = self.resolve(source_ref)?;
        debug!("Fetching overlay from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverlayLoadError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Receives overlay failures. Nothing reported here reaches the map user.
pub trait DiagnosticSink: Send + Sync + 'static {
    fn report(&self, error: &OverlayLoadError);
}

/// Logs each failure as one error line, including the cause chain
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, err: &OverlayLoadError) {
        error!("{}", diagnostic_message(err));
    }
}

/// One-line description of a failure and its causes.
///
/// The wrapped reqwest/serde error is already part of the top-level message,
/// so the cause walk starts below it.
pub fn diagnostic_message(err: &OverlayLoadError) -> String {
    let mut message = format!("Error loading GeoJSON: {}", err);
    let mut source = err.source().and_then(|wrapped| wrapped.source());
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

/// Result of one background overlay load. Callers are free to drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Attached(LayerId),
    Failed,
}

/// Fetch, parse and attach one bloom area overlay.
///
/// The surface is only locked once the document has been parsed, so a
/// failure at any step leaves it untouched.
pub async fn load_overlay<S: FeatureSource>(
    surface: &SharedSurface,
    source: &S,
    source_ref: &str,
) -> Result<LayerId, OverlayLoadError> {
    let body = source.fetch(source_ref).await?;
    let data = FeatureDocument::from_slice(&body)?;

    if let Some(count) = data.feature_count() {
        debug!("Parsed {} bloom area features from {}", count, source_ref);
    }

    let id = surface.write().await.add_layer(Layer::Overlay(Overlay::bloom_area(data)));
    info!("Bloom area overlay attached as {}", id);
    Ok(id)
}

/// Run [`load_overlay`] as a background task.
///
/// Failures go to `sink` and never escape the task. Each call attaches its
/// own overlay; repeated calls are not deduplicated.
pub fn spawn_overlay_loader<S, D>(
    surface: SharedSurface,
    source: S,
    source_ref: impl Into<String>,
    sink: D,
) -> JoinHandle<LoadOutcome>
where
    S: FeatureSource,
    D: DiagnosticSink,
{
    let source_ref = source_ref.into();
    tokio::spawn(async move {
        match load_overlay(&surface, &source, &source_ref).await {
            Ok(id) => LoadOutcome::Attached(id),
            Err(e) => {
                sink.report(&e);
                LoadOutcome::Failed
            }
        }
    })
}
