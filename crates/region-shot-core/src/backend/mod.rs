mod capture_backend;
mod http_backend;

pub(crate) use http_backend::extract_detail;

pub use {
    capture_backend::CaptureBackend,
    http_backend::{DEFAULT_REQUEST_TIMEOUT, HttpBackend},
};
