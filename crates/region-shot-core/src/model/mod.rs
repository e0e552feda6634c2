mod capture_result;
mod captured_coords;
mod config;
mod region;

pub use {
    capture_result::{CaptureResult, ScreenshotResponse},
    captured_coords::{CapturedCoordinatePair, Corner, Point},
    config::{CaptureConfig, OutputDirCheck},
    region::{Region, RegionId, RegionPayload},
};
