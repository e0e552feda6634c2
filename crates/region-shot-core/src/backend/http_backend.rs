//! reqwest implementation of [`CaptureBackend`].
//!
//! Non-2xx responses are turned into [`ClientError::Backend`], carrying the
//! backend's `detail` text when the body has one.

use crate::{
    CaptureBackend, CaptureConfig, CapturedCoordinatePair, ClientError, CoreResult,
    OutputDirCheck, Region, RegionId, RegionPayload, ScreenshotResponse,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Default request timeout, matching the original desktop client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the capture backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client rooted at `base_url` (for example `http://127.0.0.1:8000/api`).
    #[track_caller]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CoreResult<Self> {
        let raw = base_url.into();
        let base_url =
            Url::parse(raw.trim_end_matches('/')).map_err(|e| ClientError::InvalidBaseUrl {
                url: raw.clone(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: raw,
                reason: "URL cannot carry a path".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;

        debug!(base_url = %base_url, timeout_ms = timeout.as_millis(), "HttpBackend created");

        Ok(Self { client, base_url })
    }

    /// Base URL every path is joined to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    #[track_caller]
    fn url(&self, segments: &[&str]) -> CoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Pass 2xx responses through; turn anything else into [`ClientError::Backend`].
async fn ensure_success(response: Response) -> CoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = extract_detail(&body);

    debug!(status = status.as_u16(), detail = ?detail, "Backend returned error status");

    Err(ClientError::Backend {
        status: Some(status.as_u16()),
        detail,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Pull `detail` out of an error body. Non-string details are rendered as JSON.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> CoreResult<T> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
        reason: format!("{} in body of {} bytes", e, body.len()),
        location: ErrorLocation::from(Location::caller()),
    })
}

async fn read_bytes(response: Response) -> CoreResult<Vec<u8>> {
    let response = ensure_success(response).await?;
    Ok(response.bytes().await?.to_vec())
}

impl CaptureBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn list_regions(&self) -> CoreResult<Vec<Region>> {
        let response = self.client.get(self.url(&["regions"])?).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn get_region(&self, id: &RegionId) -> CoreResult<Region> {
        let response = self
            .client
            .get(self.url(&["regions", id.as_str()])?)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn create_region(&self, payload: &RegionPayload) -> CoreResult<Region> {
        let response = self
            .client
            .post(self.url(&["regions"])?)
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn update_region(&self, id: &RegionId, payload: &RegionPayload) -> CoreResult<Region> {
        let response = self
            .client
            .put(self.url(&["regions", id.as_str()])?)
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn delete_region(&self, id: &RegionId) -> CoreResult<()> {
        let response = self
            .client
            .delete(self.url(&["regions", id.as_str()])?)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn region_preview(&self, id: &RegionId) -> CoreResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url(&["regions", id.as_str(), "preview"])?)
            .send()
            .await?;
        read_bytes(response).await
    }

    #[instrument(skip(self))]
    async fn temp_preview(&self, payload: &RegionPayload) -> CoreResult<Vec<u8>> {
        let response = self
            .client
            .post(self.url(&["regions", "preview-temp"])?)
            .json(payload)
            .send()
            .await?;
        read_bytes(response).await
    }

    #[instrument(skip(self))]
    async fn get_config(&self) -> CoreResult<CaptureConfig> {
        let response = self.client.get(self.url(&["config"])?).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn update_config(&self, config: &CaptureConfig) -> CoreResult<CaptureConfig> {
        let response = self
            .client
            .put(self.url(&["config"])?)
            .json(config)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn validate_output_dir(&self, path: &str) -> CoreResult<OutputDirCheck> {
        let response = self
            .client
            .post(self.url(&["config", "validate-output-dir"])?)
            .query(&[("path", path)])
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn capture_region(&self, id: &RegionId) -> CoreResult<ScreenshotResponse> {
        let response = self
            .client
            .post(self.url(&["screenshot", id.as_str()])?)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn capture_all(&self) -> CoreResult<Vec<ScreenshotResponse>> {
        let response = self.client.post(self.url(&["screenshot", "all"])?).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn clear_captured_coords(&self) -> CoreResult<()> {
        let response = self
            .client
            .post(self.url(&["mouse", "clear-coords"])?)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    // Called every poll tick; no span to keep logs quiet.
    async fn captured_coords(&self) -> CoreResult<CapturedCoordinatePair> {
        let response = self
            .client
            .get(self.url(&["mouse", "captured-coords"])?)
            .send()
            .await?;
        read_json(response).await
    }
}
