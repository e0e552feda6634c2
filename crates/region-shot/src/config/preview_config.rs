use crate::config::{default_open_viewer, default_preview_dir};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where previews are written for viewing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Directory preview images are written to.
    #[serde(default = "default_preview_dir")]
    pub directory: PathBuf,

    /// Open each written preview with the system image viewer.
    #[serde(default = "default_open_viewer")]
    pub open_viewer: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            directory: default_preview_dir(),
            open_viewer: default_open_viewer(),
        }
    }
}
