use crate::{CaptureBackend, RegionId, RegionPayload};

use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use image::ImageReader;
use tracing::{debug, info, instrument, warn};

/// Name sent with temporary previews; the backend ignores it.
pub(crate) const TEMP_PREVIEW_NAME: &str = "temp";

/// What to render a preview of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// A persisted region, rendered from its stored coordinates.
    Stored(RegionId),
    /// Unsaved draft coordinates.
    Draft(RegionPayload),
}

/// A rendered preview.
///
/// Dropping the handle releases it. The owning [`PreviewManager`] keeps at
/// most one handle alive.
#[derive(Debug)]
pub struct PreviewHandle {
    serial: u64,
    target: PreviewTarget,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    /// Per-manager sequence number of this render.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// What was rendered.
    pub fn target(&self) -> &PreviewTarget {
        &self.target
    }

    /// Encoded image bytes as returned by the backend.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        debug!(serial = self.serial, "Preview released");
    }
}

/// Requests previews and owns the one handle currently on display.
pub struct PreviewManager<B> {
    backend: Arc<B>,
    current: Option<PreviewHandle>,
    live: Arc<AtomicUsize>,
    next_serial: u64,
}

impl<B: CaptureBackend> PreviewManager<B> {
    /// Create a manager with nothing on display.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            current: None,
            live: Arc::new(AtomicUsize::new(0)),
            next_serial: 1,
        }
    }

    /// Render `target`, replacing whatever was on display.
    ///
    /// The previous handle is released once the new request settles, whether
    /// or not it succeeded. Render failures yield `None` ("no preview
    /// available") and never an error.
    #[instrument(skip(self))]
    pub async fn request(&mut self, target: PreviewTarget) -> Option<&PreviewHandle> {
        let bytes = match &target {
            PreviewTarget::Stored(id) => self.backend.region_preview(id).await,
            PreviewTarget::Draft(payload) if payload.is_zero_size() => {
                debug!("Draft has zero area, no preview requested");
                self.release();
                return None;
            }
            PreviewTarget::Draft(payload) => {
                let payload = RegionPayload {
                    name: TEMP_PREVIEW_NAME.to_string(),
                    ..payload.clone()
                };
                self.backend.temp_preview(&payload).await
            }
        };

        self.release();

        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = ?e, "Preview render failed");
                return None;
            }
        };

        let (width, height) = match image_dimensions(&bytes) {
            Some(dimensions) => dimensions,
            None => {
                warn!(byte_len = bytes.len(), "Preview is not a readable image");
                return None;
            }
        };

        let serial = self.next_serial;
        self.next_serial += 1;
        self.live.fetch_add(1, Ordering::AcqRel);

        info!(serial, width, height, "Preview ready");

        self.current = Some(PreviewHandle {
            serial,
            target,
            bytes,
            width,
            height,
            live: Arc::clone(&self.live),
        });
        self.current.as_ref()
    }

    /// The handle on display, if any.
    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    /// Drop the handle on display.
    pub fn release(&mut self) {
        self.current = None;
    }

    /// Handles issued by this manager that are still alive.
    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
