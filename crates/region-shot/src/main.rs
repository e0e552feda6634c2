//! Region-shot: define screen regions with backend hotkeys and capture them.

mod app;
mod command;
mod config;
mod draft_input;
mod error;
mod preview_viewer;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    command::{Cli, Command, ConfigChange},
    draft_input::DraftInput,
    error::{AppError, Result as AppResult},
    preview_viewer::PreviewViewer,
};

use crate::config::Config;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "region_shot=info,region_shot_core=info";

/// Application entry point.
fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit with status 2, --help and --version with 0.
    let command = Cli::parse().command;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    match rt.block_on(run(&config, command)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!(error = ?e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    }
}

async fn run(config: &Config, command: Command) -> AppResult<bool> {
    let app = App::from_config(config)?;
    app.run(command).await
}
