use crate::{CaptureBackend, CaptureConfig, CoreResult, ValidationError};

use std::sync::Arc;

use tracing::{info, instrument, warn};

/// Access to the backend's singleton configuration.
pub struct ConfigRepository<B> {
    backend: Arc<B>,
}

impl<B> Clone for ConfigRepository<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: CaptureBackend> ConfigRepository<B> {
    /// Wrap a shared backend.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Current backend configuration.
    #[instrument(skip(self))]
    pub async fn get(&self) -> CoreResult<CaptureConfig> {
        self.backend.get_config().await
    }

    /// Validate and store `config`.
    ///
    /// Local checks run first, then the backend's output-directory check.
    /// Nothing is written unless both pass.
    #[instrument(skip(self))]
    pub async fn update(&self, config: &CaptureConfig) -> CoreResult<CaptureConfig> {
        config.validate_local()?;

        let check = self.backend.validate_output_dir(&config.output_dir).await?;
        if !check.valid {
            warn!(output_dir = %config.output_dir, message = %check.message, "Output directory rejected");
            return Err(ValidationError::InvalidOutputDir {
                message: check.message,
            }
            .into());
        }

        let saved = self.backend.update_config(config).await?;
        info!(
            output_dir = %saved.output_dir,
            screenshot_interval = saved.screenshot_interval,
            "Configuration saved"
        );
        Ok(saved)
    }
}
