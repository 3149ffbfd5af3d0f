use crate::data::{Caption, ImageRef};
use chrono::Utc;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Public cat image service.
pub const DEFAULT_ENDPOINT: &str = "https://cataas.com";

/// Why a single image request failed. Neither case is retried.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, non-success status or unreadable body
    #[error("could not retrieve image")]
    Retrieve(String),
    /// The metadata carried neither `_id` nor `id`
    #[error("could not find image id")]
    MissingId,
}

/// Something that can turn a caption into a freshly generated image.
pub trait ImageSource {
    /// Performs exactly one request for `caption`.
    fn fetch_image(
        &self,
        caption: &Caption,
    ) -> impl Future<Output = Result<ImageRef, FetchError>> + Send;
}

/// HTTP client for the cataas.com API.
#[derive(Debug, Clone)]
pub struct CataasClient {
    endpoint: String,
    http: reqwest::Client,
}

impl CataasClient {
    /// Builds a client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, http))
    }

    pub fn with_client(endpoint: &str, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn metadata_url(&self, encoded_caption: &str) -> String {
        format!("{}/cat/says/{}?json=true", self.endpoint, encoded_caption)
    }

    /// The timestamp keeps repeated identical captions from hitting a cached image.
    fn image_url(&self, id: &str, encoded_caption: &str, timestamp: i64) -> String {
        format!(
            "{}/cat/{}/says/{}?t={}",
            self.endpoint, id, encoded_caption, timestamp
        )
    }
}

impl ImageSource for CataasClient {
    async fn fetch_image(&self, caption: &Caption) -> Result<ImageRef, FetchError> {
        let encoded = urlencoding::encode(caption.as_str());
        let url = self.metadata_url(&encoded);
        debug!(%url, "requesting cat metadata");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "cat metadata request failed");
                FetchError::Retrieve(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "cat metadata request was not successful");
            return Err(FetchError::Retrieve(format!("HTTP {}", status)));
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!(error = %e, "cat metadata body is not JSON");
            FetchError::Retrieve(e.to_string())
        })?;

        let id = extract_image_id(&body).ok_or(FetchError::MissingId)?;
        let image_url = self.image_url(&id, &encoded, Utc::now().timestamp_millis());
        debug!(%id, %image_url, "built cat image reference");

        ImageRef::new(image_url)
            .ok_or_else(|| FetchError::Retrieve(format!("endpoint {} is not http(s)", self.endpoint)))
    }
}

/// Picks the image identifier out of the metadata, preferring `_id`.
///
/// Empty strings, zero and non-scalar values count as absent.
fn extract_image_id(body: &Value) -> Option<String> {
    ["_id", "id"].iter().find_map(|field| match body.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}
