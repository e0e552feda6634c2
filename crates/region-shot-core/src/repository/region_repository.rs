use crate::{CaptureBackend, CoreResult, Region, RegionId, RegionPayload};

use std::sync::Arc;

use tracing::{info, instrument};

/// Region CRUD over the backend.
///
/// Responses are normalised so `(x1, y1)` is always the top-left corner.
pub struct RegionRepository<B> {
    backend: Arc<B>,
}

impl<B> Clone for RegionRepository<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: CaptureBackend> RegionRepository<B> {
    /// Wrap a shared backend.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// All regions, in backend order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> CoreResult<Vec<Region>> {
        let regions = self.backend.list_regions().await?;
        Ok(regions.into_iter().map(Region::normalized).collect())
    }

    /// One region by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &RegionId) -> CoreResult<Region> {
        Ok(self.backend.get_region(id).await?.normalized())
    }

    /// Persist a new region; the backend assigns its id.
    #[instrument(skip(self))]
    pub async fn create(&self, payload: &RegionPayload) -> CoreResult<Region> {
        let region = self.backend.create_region(payload).await?.normalized();
        info!(region_id = %region.id, name = %region.name, "Region created");
        Ok(region)
    }

    /// Overwrite an existing region.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &RegionId, payload: &RegionPayload) -> CoreResult<Region> {
        let region = self.backend.update_region(id, payload).await?.normalized();
        info!(region_id = %region.id, name = %region.name, "Region updated");
        Ok(region)
    }

    /// Remove a region. Callers confirm with the user first.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &RegionId) -> CoreResult<()> {
        self.backend.delete_region(id).await?;
        info!(region_id = %id, "Region deleted");
        Ok(())
    }
}
