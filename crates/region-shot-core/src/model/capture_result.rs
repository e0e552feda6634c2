use crate::RegionId;

use serde::{Deserialize, Serialize};

/// Outcome of capturing one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    /// Region the outcome belongs to, when known.
    pub region_id: Option<RegionId>,
    /// Whether the screenshot was written.
    pub success: bool,
    /// Path of the written file.
    pub file_path: Option<String>,
    /// Failure text reported by the backend.
    pub error: Option<String>,
}

impl CaptureResult {
    /// A successful capture.
    pub fn succeeded(region_id: Option<RegionId>, file_path: Option<String>) -> Self {
        Self {
            region_id,
            success: true,
            file_path,
            error: None,
        }
    }

    /// A failed capture with the backend's explanation.
    pub fn failed(region_id: Option<RegionId>, error: impl Into<String>) -> Self {
        Self {
            region_id,
            success: false,
            file_path: None,
            error: Some(error.into()),
        }
    }
}

/// Screenshot record as the backend sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    /// Whether the screenshot was written.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Status or failure message.
    #[serde(default)]
    pub message: String,
    /// Path of the written file.
    #[serde(default)]
    pub file_path: Option<String>,
    /// Region id, for backends that report it.
    #[serde(default)]
    pub region_id: Option<RegionId>,
}

// Single-region responses without a `success` flag only arrive on 2xx.
fn default_success() -> bool {
    true
}

impl From<ScreenshotResponse> for CaptureResult {
    fn from(response: ScreenshotResponse) -> Self {
        if response.success {
            CaptureResult::succeeded(response.region_id, response.file_path)
        } else {
            CaptureResult::failed(response.region_id, response.message)
        }
    }
}
