use crate::{BatchStatus, BatchSummary, CaptureBackend, CaptureResult, CoreResult, Region, RegionId};

use std::sync::Arc;

use tracing::{info, instrument, warn};

/// Issues single and batch screenshot requests.
pub struct ScreenshotOrchestrator<B> {
    backend: Arc<B>,
}

impl<B: CaptureBackend> ScreenshotOrchestrator<B> {
    /// Wrap a shared backend.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Capture one region.
    ///
    /// Failures come back as an unsuccessful [`CaptureResult`] carrying the
    /// backend's detail text, so single and batch outcomes share one shape.
    #[instrument(skip(self))]
    pub async fn capture_one(&self, region_id: &RegionId) -> CaptureResult {
        match self.backend.capture_region(region_id).await {
            Ok(response) => {
                let mut result = CaptureResult::from(response);
                result.region_id.get_or_insert_with(|| region_id.clone());
                if result.success {
                    info!(region_id = %region_id, file_path = ?result.file_path, "Screenshot captured");
                } else {
                    warn!(region_id = %region_id, error = ?result.error, "Screenshot failed");
                }
                result
            }
            Err(e) => {
                warn!(region_id = %region_id, error = ?e, "Screenshot request failed");
                CaptureResult::failed(Some(region_id.clone()), e.user_message())
            }
        }
    }

    /// Capture every region the backend knows about.
    ///
    /// `known_regions` is the caller's current region list. When the backend
    /// omits region ids and returns one result per known region, results are
    /// matched to regions by position.
    ///
    /// Only a failure of the batch request itself is an error; per-region
    /// failures are part of the returned summary.
    #[instrument(skip(self, known_regions), fields(known = known_regions.len()))]
    pub async fn capture_all(&self, known_regions: &[Region]) -> CoreResult<BatchSummary> {
        let responses = self.backend.capture_all().await?;
        let pair_by_position = responses.len() == known_regions.len();

        let results = responses
            .into_iter()
            .enumerate()
            .map(|(index, response)| {
                let mut result = CaptureResult::from(response);
                if result.region_id.is_none() && pair_by_position {
                    result.region_id = known_regions.get(index).map(|r| r.id.clone());
                }
                result
            })
            .collect();

        let summary = BatchSummary::new(results);

        match summary.status() {
            BatchStatus::FullSuccess => {
                info!(total = summary.total(), "Batch capture succeeded")
            }
            BatchStatus::PartialSuccess { succeeded, total } => {
                warn!(succeeded, total, "Batch capture partially failed")
            }
        }

        Ok(summary)
    }
}
