use crate::{AppError, AppResult};

use clap::{Parser, Subcommand};
use region_shot_core::{CaptureConfig, RegionId};

/// Command line of the `region-shot` binary.
#[derive(Parser, Debug)]
#[command(
    name = "region-shot",
    version,
    about = "Define screen regions with backend hotkeys and capture them",
    arg_required_else_help = true
)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// One top-level command.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List defined regions
    #[command(visible_alias = "list")]
    Regions,
    /// Show one region and open its preview
    Show {
        /// Region to show.
        #[arg(value_parser = parse_region_id)]
        id: RegionId,
    },
    /// Define a new region with the backend hotkeys
    #[command(visible_alias = "new")]
    Define,
    /// Edit an existing region
    Edit {
        /// Region to edit.
        #[arg(value_parser = parse_region_id)]
        id: RegionId,
    },
    /// Delete a region (asks for confirmation)
    Delete {
        /// Region to delete.
        #[arg(value_parser = parse_region_id)]
        id: RegionId,
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        assume_yes: bool,
    },
    /// Capture one region
    Shoot {
        /// Region to capture.
        #[arg(value_parser = parse_region_id)]
        id: RegionId,
    },
    /// Capture every region
    ShootAll,
    /// Show the backend capture configuration
    #[command(name = "config")]
    ShowConfig,
    /// Update output_dir, hotkey_a, hotkey_b, hotkey_c or screenshot_interval
    SetConfig {
        /// Assignments as key=value, applied in order.
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_config_change)]
        changes: Vec<ConfigChange>,
    },
}

/// One `key=value` assignment for `set-config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChange {
    /// New `output_dir`.
    OutputDir(String),
    /// New top-left hotkey.
    HotkeyA(String),
    /// New bottom-right hotkey.
    HotkeyB(String),
    /// New capture-all hotkey.
    HotkeyC(String),
    /// New timer interval in seconds.
    ScreenshotInterval(u32),
}

impl ConfigChange {
    /// Parse `key=value`.
    #[track_caller]
    pub fn parse(assignment: &str) -> AppResult<Self> {
        let Some((key, value)) = assignment.split_once('=') else {
            return Err(AppError::usage(format!(
                "expected key=value, got '{}'",
                assignment
            )));
        };

        let value = value.to_string();
        match key.trim() {
            "output_dir" => Ok(ConfigChange::OutputDir(value)),
            "hotkey_a" => Ok(ConfigChange::HotkeyA(value)),
            "hotkey_b" => Ok(ConfigChange::HotkeyB(value)),
            "hotkey_c" => Ok(ConfigChange::HotkeyC(value)),
            "screenshot_interval" => value
                .trim()
                .parse()
                .map(ConfigChange::ScreenshotInterval)
                .map_err(|_| {
                    AppError::usage(format!(
                        "screenshot_interval must be a whole number of seconds, got '{}'",
                        value
                    ))
                }),
            other => Err(AppError::usage(format!("unknown config key '{}'", other))),
        }
    }

    /// Apply this change to an editable copy of the configuration.
    pub fn apply(&self, config: &mut CaptureConfig) {
        match self {
            ConfigChange::OutputDir(value) => config.output_dir = value.clone(),
            ConfigChange::HotkeyA(value) => config.hotkey_a = value.clone(),
            ConfigChange::HotkeyB(value) => config.hotkey_b = value.clone(),
            ConfigChange::HotkeyC(value) => config.hotkey_c = value.clone(),
            ConfigChange::ScreenshotInterval(seconds) => config.screenshot_interval = *seconds,
        }
    }
}

fn parse_region_id(raw: &str) -> Result<RegionId, String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err("region id must not be empty".to_string());
    }
    Ok(RegionId::from(id))
}

fn parse_config_change(raw: &str) -> Result<ConfigChange, String> {
    ConfigChange::parse(raw).map_err(|e| e.user_message())
}
