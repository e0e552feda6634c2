use crate::ValidationError;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_OUTPUT_DIR: &str = "./screenshots";
pub(crate) const DEFAULT_HOTKEY_TOP_LEFT: &str = "ctrl+alt+1";
pub(crate) const DEFAULT_HOTKEY_BOTTOM_RIGHT: &str = "ctrl+alt+2";
pub(crate) const DEFAULT_HOTKEY_CAPTURE_ALL: &str = "ctrl+alt+s";

/// Backend-wide capture configuration.
///
/// The client holds an editable copy until it is explicitly saved through
/// [`ConfigRepository::update`](crate::ConfigRepository::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Directory screenshots are written to.
    pub output_dir: String,
    /// Hotkey recording the top-left corner.
    pub hotkey_a: String,
    /// Hotkey recording the bottom-right corner.
    pub hotkey_b: String,
    /// Hotkey triggering a full batch capture.
    pub hotkey_c: String,
    /// Timer interval in seconds; `0` disables the timer.
    #[serde(default)]
    pub screenshot_interval: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            hotkey_a: DEFAULT_HOTKEY_TOP_LEFT.to_string(),
            hotkey_b: DEFAULT_HOTKEY_BOTTOM_RIGHT.to_string(),
            hotkey_c: DEFAULT_HOTKEY_CAPTURE_ALL.to_string(),
            screenshot_interval: 0,
        }
    }
}

impl CaptureConfig {
    /// Whether the periodic capture timer is enabled.
    pub fn timer_enabled(&self) -> bool {
        self.screenshot_interval > 0
    }

    /// Checks that can run without the backend.
    pub fn validate_local(&self) -> Result<(), ValidationError> {
        if self.output_dir.trim().is_empty() {
            return Err(ValidationError::InvalidOutputDir {
                message: "output directory is empty".to_string(),
            });
        }

        for (slot, value) in [
            ("hotkey_a", &self.hotkey_a),
            ("hotkey_b", &self.hotkey_b),
            ("hotkey_c", &self.hotkey_c),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyHotkey { slot });
            }
        }

        Ok(())
    }
}

/// Response of the output-directory validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDirCheck {
    /// Whether the backend can write to the directory.
    pub valid: bool,
    /// Explanation from the backend.
    #[serde(default)]
    pub message: String,
}
