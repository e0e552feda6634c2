use region_shot_core::ClientError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the region-shot binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Capture client error from region-shot-core.
    #[error("Client error: {source} {location}")]
    Client {
        /// The underlying client error.
        #[source]
        source: ClientError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem or terminal operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Command line could not be understood.
    #[error("Usage error: {message} {location}")]
    UsageError {
        /// What was wrong with the arguments.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl AppError {
    /// Build a [`AppError::UsageError`] at the caller's location.
    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::UsageError {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text shown to the user on stderr, without the error location.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Client { source, .. } => source.user_message(),
            AppError::ConfigError { reason, .. } => reason.clone(),
            AppError::IoError { source, .. } => source.to_string(),
            AppError::UsageError { message, .. } => message.clone(),
        }
    }
}

// Manual From<ClientError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<ClientError> for AppError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        AppError::Client {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
