use crate::{
    CaptureBackend, CaptureConfig, CapturedCoordinatePair, ClientError, CoreResult,
    OutputDirCheck, Point, Region, RegionId, RegionPayload, ScreenshotResponse,
};

use std::{
    collections::VecDeque,
    io::Cursor,
    panic::Location,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use error_location::ErrorLocation;
use image::{DynamicImage, ImageFormat, RgbaImage};

/// One scripted answer to `GET /mouse/captured-coords`.
#[derive(Debug, Clone)]
pub(crate) enum Poll {
    Coords(CapturedCoordinatePair),
    Fail,
}

pub(crate) fn top_left(x: i32, y: i32) -> Poll {
    Poll::Coords(CapturedCoordinatePair {
        top_left: Some(Point::new(x, y)),
        bottom_right: None,
    })
}

pub(crate) fn both(x1: i32, y1: i32, x2: i32, y2: i32) -> Poll {
    Poll::Coords(CapturedCoordinatePair {
        top_left: Some(Point::new(x1, y1)),
        bottom_right: Some(Point::new(x2, y2)),
    })
}

/// Encode a blank PNG of the given size.
#[allow(clippy::unwrap_used)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

#[track_caller]
pub(crate) fn backend_error(status: u16, detail: &str) -> ClientError {
    ClientError::Backend {
        status: Some(status),
        detail: Some(detail.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub clear: usize,
    pub poll: usize,
    pub create: usize,
    pub update: usize,
    pub stored_preview: usize,
    pub temp_preview: usize,
    pub validate_dir: usize,
    pub update_config: usize,
}

#[derive(Debug)]
pub(crate) struct FakeState {
    pub regions: Vec<Region>,
    pub coords: CapturedCoordinatePair,
    pub poll_script: VecDeque<Poll>,
    pub fail_polls: bool,
    pub poll_delay: Option<Duration>,
    pub in_flight: usize,
    pub max_in_flight: usize,
    pub fail_clear: bool,
    pub fail_save: Option<String>,
    pub preview: Option<Vec<u8>>,
    pub last_temp_payload: Option<RegionPayload>,
    pub capture_results: Vec<ScreenshotResponse>,
    pub capture_all_error: Option<String>,
    pub config: CaptureConfig,
    pub output_dir_check: OutputDirCheck,
    pub calls: Calls,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            coords: CapturedCoordinatePair::default(),
            poll_script: VecDeque::new(),
            fail_polls: false,
            poll_delay: None,
            in_flight: 0,
            max_in_flight: 0,
            fail_clear: false,
            fail_save: None,
            preview: Some(png_bytes(4, 3)),
            last_temp_payload: None,
            capture_results: Vec::new(),
            capture_all_error: None,
            config: CaptureConfig::default(),
            output_dir_check: OutputDirCheck {
                valid: true,
                message: "ok".to_string(),
            },
            calls: Calls::default(),
        }
    }
}

/// In-memory backend with scripted coordinate polls.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub(crate) fn with_polls(polls: impl IntoIterator<Item = Poll>) -> Self {
        let backend = Self::default();
        backend.state().poll_script.extend(polls);
        backend
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn seed_region(&self, name: &str, x1: i32, y1: i32, x2: i32, y2: i32) -> Region {
        let mut state = self.state();
        let region = Region {
            id: RegionId(format!("region-{}", state.regions.len() + 1)),
            name: name.to_string(),
            x1,
            y1,
            x2,
            y2,
            created_at: None,
        };
        state.regions.push(region.clone());
        region
    }
}

impl CaptureBackend for FakeBackend {
    async fn list_regions(&self) -> CoreResult<Vec<Region>> {
        Ok(self.state().regions.clone())
    }

    async fn get_region(&self, id: &RegionId) -> CoreResult<Region> {
        self.state()
            .regions
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| backend_error(404, "Region not found"))
    }

    async fn create_region(&self, payload: &RegionPayload) -> CoreResult<Region> {
        let mut state = self.state();
        state.calls.create += 1;
        if let Some(detail) = state.fail_save.clone() {
            return Err(backend_error(500, &detail));
        }
        let region = Region {
            id: RegionId(format!("region-{}", state.regions.len() + 1)),
            name: payload.name.clone(),
            x1: payload.x1,
            y1: payload.y1,
            x2: payload.x2,
            y2: payload.y2,
            created_at: Some("2026-10-19T00:00:00".to_string()),
        };
        state.regions.push(region.clone());
        Ok(region)
    }

    async fn update_region(&self, id: &RegionId, payload: &RegionPayload) -> CoreResult<Region> {
        let mut state = self.state();
        state.calls.update += 1;
        if let Some(detail) = state.fail_save.clone() {
            return Err(backend_error(500, &detail));
        }
        let region = state
            .regions
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| backend_error(404, "Region not found"))?;
        region.name = payload.name.clone();
        region.x1 = payload.x1;
        region.y1 = payload.y1;
        region.x2 = payload.x2;
        region.y2 = payload.y2;
        Ok(region.clone())
    }

    async fn delete_region(&self, id: &RegionId) -> CoreResult<()> {
        let mut state = self.state();
        let before = state.regions.len();
        state.regions.retain(|r| &r.id != id);
        if state.regions.len() == before {
            return Err(backend_error(404, "Region not found"));
        }
        Ok(())
    }

    async fn region_preview(&self, _id: &RegionId) -> CoreResult<Vec<u8>> {
        let mut state = self.state();
        state.calls.stored_preview += 1;
        state
            .preview
            .clone()
            .ok_or_else(|| backend_error(500, "Failed to render preview"))
    }

    async fn temp_preview(&self, payload: &RegionPayload) -> CoreResult<Vec<u8>> {
        let mut state = self.state();
        state.calls.temp_preview += 1;
        state.last_temp_payload = Some(payload.clone());
        state
            .preview
            .clone()
            .ok_or_else(|| backend_error(500, "Failed to render preview"))
    }

    async fn get_config(&self) -> CoreResult<CaptureConfig> {
        Ok(self.state().config.clone())
    }

    async fn update_config(&self, config: &CaptureConfig) -> CoreResult<CaptureConfig> {
        let mut state = self.state();
        state.calls.update_config += 1;
        state.config = config.clone();
        Ok(config.clone())
    }

    async fn validate_output_dir(&self, _path: &str) -> CoreResult<OutputDirCheck> {
        let mut state = self.state();
        state.calls.validate_dir += 1;
        Ok(state.output_dir_check.clone())
    }

    async fn capture_region(&self, id: &RegionId) -> CoreResult<ScreenshotResponse> {
        let state = self.state();
        if !state.regions.iter().any(|r| &r.id == id) {
            return Err(backend_error(404, "Region not found"));
        }
        Ok(ScreenshotResponse {
            success: true,
            message: "saved".to_string(),
            file_path: Some(format!("./screenshots/{}.png", id)),
            region_id: None,
        })
    }

    async fn capture_all(&self) -> CoreResult<Vec<ScreenshotResponse>> {
        let state = self.state();
        if let Some(detail) = &state.capture_all_error {
            return Err(backend_error(400, detail));
        }
        Ok(state.capture_results.clone())
    }

    async fn clear_captured_coords(&self) -> CoreResult<()> {
        let mut state = self.state();
        state.calls.clear += 1;
        if state.fail_clear {
            return Err(backend_error(503, "Hotkey service unavailable"));
        }
        state.coords = CapturedCoordinatePair::default();
        Ok(())
    }

    async fn captured_coords(&self) -> CoreResult<CapturedCoordinatePair> {
        let delay = {
            let mut state = self.state();
            state.calls.poll += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.poll_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        state.in_flight -= 1;
        if state.fail_polls {
            return Err(backend_error(502, "Bad gateway"));
        }
        match state.poll_script.pop_front() {
            Some(Poll::Coords(pair)) => {
                state.coords = pair;
                Ok(pair)
            }
            Some(Poll::Fail) => Err(backend_error(502, "Bad gateway")),
            None => Ok(state.coords),
        }
    }
}
