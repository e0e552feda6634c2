//! Region-shot Core Library
//!
//! Client-side workflow for defining named screen regions through backend
//! hotkeys, previewing them, and triggering screenshot capture.
//!
//! # Example
//!
//! ```no_run
//! use region_shot_core::{
//!     CoreResult, DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DraftField, HttpBackend,
//!     RegionDraftMachine,
//! };
//!
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let backend = Arc::new(HttpBackend::new(
//!         "http://127.0.0.1:8000/api",
//!         DEFAULT_REQUEST_TIMEOUT,
//!     )?);
//!     let mut draft = RegionDraftMachine::new(backend, DEFAULT_POLL_INTERVAL);
//!
//!     draft.edit_field(DraftField::Name, "price").await?;
//!     draft.start_capture().await?;
//!     while draft.next_capture_event().await.is_some() {}
//!
//!     let region = draft.save().await?;
//!     println!("Saved region {}", region.id);
//!     Ok(())
//! }
//! ```

mod backend;
mod capture;
mod draft;
mod error;
mod model;
mod preview;
mod repository;
mod screenshot;

pub use {
    backend::{CaptureBackend, DEFAULT_REQUEST_TIMEOUT, HttpBackend},
    capture::{
        CaptureEvent, CaptureSubscription, CoordinateCapture, DEFAULT_POLL_INTERVAL,
        SessionEvent, SessionToken,
    },
    draft::{
        CaptureCancelled, DraftField, DraftStep, RegionDraft, RegionDraftMachine,
        parse_coordinate,
    },
    error::{ClientError, GENERIC_FAILURE_MESSAGE, Result as CoreResult, ValidationError},
    model::{
        CaptureConfig, CaptureResult, CapturedCoordinatePair, Corner, OutputDirCheck, Point,
        Region, RegionId, RegionPayload, ScreenshotResponse,
    },
    preview::{PreviewHandle, PreviewManager, PreviewTarget},
    repository::{ConfigRepository, RegionRepository},
    screenshot::{BatchStatus, BatchSummary, ScreenshotOrchestrator},
};

#[cfg(test)]
mod tests;
