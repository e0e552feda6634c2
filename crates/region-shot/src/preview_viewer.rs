use crate::{AppResult, config::PreviewConfig};

use std::{fs, path::PathBuf};

use region_shot_core::PreviewHandle;
use tracing::{debug, info, warn};

/// Writes rendered previews to disk and hands them to the system viewer.
#[derive(Debug, Clone)]
pub struct PreviewViewer {
    directory: PathBuf,
    open_viewer: bool,
}

impl PreviewViewer {
    /// Viewer writing into the configured preview directory.
    pub fn new(config: &PreviewConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            open_viewer: config.open_viewer,
        }
    }

    /// File a preview labelled `label` is written to.
    pub fn path_for(&self, label: &str) -> PathBuf {
        let label: String = label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.directory.join(format!("{}.png", label))
    }

    /// Write `handle` as `<label>.png` and open it if configured to.
    ///
    /// Viewer launch failures are logged, not returned; the file is still there.
    #[track_caller]
    pub fn show(&self, handle: &PreviewHandle, label: &str) -> AppResult<PathBuf> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory)?;
            debug!(directory = ?self.directory, "Created preview directory");
        }

        let path = self.path_for(label);
        fs::write(&path, handle.bytes())?;

        info!(
            path = ?path,
            serial = handle.serial(),
            width = handle.width(),
            height = handle.height(),
            "Preview written"
        );

        if self.open_viewer {
            if let Err(e) = open::that(&path) {
                warn!(path = ?path, error = ?e, "Failed to open preview viewer");
            }
        }

        Ok(path)
    }
}
