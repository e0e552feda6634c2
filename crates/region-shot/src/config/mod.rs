mod backend_config;
#[allow(clippy::module_inception)]
mod config;
mod polling_config;
mod preview_config;

pub(crate) use {
    backend_config::BackendConfig, config::Config, polling_config::PollingConfig,
    preview_config::PreviewConfig,
};

use std::path::PathBuf;

use directories::ProjectDirs;

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 300;
pub(crate) const DEFAULT_OPEN_VIEWER: bool = true;
pub(crate) const PREVIEW_DIR_NAME: &str = "previews";

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_open_viewer() -> bool {
    DEFAULT_OPEN_VIEWER
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "region-shot", "Region-Shot")
}

/// `previews` under the platform data dir, or under the temp dir when the
/// platform has no home directory.
pub(crate) fn default_preview_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(PREVIEW_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join("region-shot").join(PREVIEW_DIR_NAME))
}
