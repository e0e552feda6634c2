mod coordinate_capture;
mod session;

pub use {
    coordinate_capture::{CaptureSubscription, CoordinateCapture, DEFAULT_POLL_INTERVAL},
    session::{CaptureEvent, SessionEvent, SessionToken},
};
