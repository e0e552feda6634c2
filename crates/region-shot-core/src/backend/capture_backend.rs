use crate::{
    CaptureConfig, CapturedCoordinatePair, CoreResult, OutputDirCheck, Region, RegionId,
    RegionPayload, ScreenshotResponse,
};

use std::future::Future;

/// Operations offered by the capture backend.
///
/// The backend owns hotkey registration, the captured-coordinate pair,
/// image rendering and persistence. Every method is a single request; none
/// of them retry.
pub trait CaptureBackend: Send + Sync + 'static {
    /// `GET /regions`
    fn list_regions(&self) -> impl Future<Output = CoreResult<Vec<Region>>> + Send;

    /// `GET /regions/{id}`
    fn get_region(&self, id: &RegionId) -> impl Future<Output = CoreResult<Region>> + Send;

    /// `POST /regions`
    fn create_region(
        &self,
        payload: &RegionPayload,
    ) -> impl Future<Output = CoreResult<Region>> + Send;

    /// `PUT /regions/{id}`
    fn update_region(
        &self,
        id: &RegionId,
        payload: &RegionPayload,
    ) -> impl Future<Output = CoreResult<Region>> + Send;

    /// `DELETE /regions/{id}`
    fn delete_region(&self, id: &RegionId) -> impl Future<Output = CoreResult<()>> + Send;

    /// `GET /regions/{id}/preview`, encoded image bytes.
    fn region_preview(&self, id: &RegionId) -> impl Future<Output = CoreResult<Vec<u8>>> + Send;

    /// `POST /regions/preview-temp`, encoded image bytes.
    fn temp_preview(
        &self,
        payload: &RegionPayload,
    ) -> impl Future<Output = CoreResult<Vec<u8>>> + Send;

    /// `GET /config`
    fn get_config(&self) -> impl Future<Output = CoreResult<CaptureConfig>> + Send;

    /// `PUT /config`
    fn update_config(
        &self,
        config: &CaptureConfig,
    ) -> impl Future<Output = CoreResult<CaptureConfig>> + Send;

    /// `POST /config/validate-output-dir?path=`
    fn validate_output_dir(
        &self,
        path: &str,
    ) -> impl Future<Output = CoreResult<OutputDirCheck>> + Send;

    /// `POST /screenshot/{id}`
    fn capture_region(
        &self,
        id: &RegionId,
    ) -> impl Future<Output = CoreResult<ScreenshotResponse>> + Send;

    /// `POST /screenshot/all`
    fn capture_all(&self) -> impl Future<Output = CoreResult<Vec<ScreenshotResponse>>> + Send;

    /// `POST /mouse/clear-coords`
    fn clear_captured_coords(&self) -> impl Future<Output = CoreResult<()>> + Send;

    /// `GET /mouse/captured-coords`
    fn captured_coords(&self) -> impl Future<Output = CoreResult<CapturedCoordinatePair>> + Send;
}
