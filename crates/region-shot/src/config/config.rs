//! Client settings for region-shot.
//!
//! Handles loading and saving the TOML settings file with cross-platform
//! paths and atomic write operations. Backend-wide capture settings are not
//! stored here; they live on the backend.

use crate::{
    AppError, AppResult,
    config::{BackendConfig, PollingConfig, PreviewConfig, project_dirs},
};

use std::{
    fs,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main settings struct. Every section may be omitted from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Coordinate capture polling.
    #[serde(default)]
    pub capture: PollingConfig,
    /// Preview output.
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Config {
    /// Load settings from the platform config directory, creating defaults if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Read and parse the settings file at `path`.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save settings to `path`. The file is replaced in one rename, so a
    /// crash mid-save leaves the previous settings intact.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        replace_file(path, contents.as_bytes()).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to save config to {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = project_dirs().ok_or_else(|| AppError::ConfigError {
            reason: "No home directory to keep settings in".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}

/// Write `contents` beside `path`, flush it to disk, then rename over `path`.
fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let staging = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&staging)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(&staging, path)
}
