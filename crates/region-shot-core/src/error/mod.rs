use crate::draft::DraftStep;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Message shown when the backend gave no `detail` of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request to capture backend failed";

/// Input rejected locally before any request reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Region name is empty or whitespace.
    #[error("Region name is required")]
    NameRequired,

    /// Region has zero width or zero height.
    #[error("Region width or height cannot be zero")]
    ZeroSize,

    /// A capture session was finished before both corners were captured.
    #[error("Capture incomplete, never captured: {missing}")]
    IncompleteCapture {
        /// Human-readable list of the missing corners.
        missing: String,
    },

    /// Backend rejected the configured output directory.
    #[error("Output directory is not usable: {message}")]
    InvalidOutputDir {
        /// Reason reported by the backend.
        message: String,
    },

    /// A hotkey binding is empty.
    #[error("Hotkey {slot} must not be empty")]
    EmptyHotkey {
        /// Which binding (`hotkey_a`, `hotkey_b`, `hotkey_c`).
        slot: &'static str,
    },
}

/// Errors surfaced by the capture client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input failed local validation; nothing was sent.
    #[error("Validation failed: {source} {location}")]
    Validation {
        /// The specific validation failure.
        #[source]
        source: ValidationError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Backend answered with a non-success status.
    #[error("Backend error (status {status:?}): {} {location}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Backend {
        /// HTTP status, when the failure came from an HTTP response.
        status: Option<u16>,
        /// The backend's `detail` text, when it sent one.
        detail: Option<String>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Request never produced a response (connect, timeout, TLS).
    #[error("Transport error: {source} {location}")]
    Transport {
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Backend base URL could not be parsed or cannot take path segments.
    #[error("Invalid backend URL '{url}': {reason} {location}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Response body did not match the expected record.
    #[error("Malformed backend response: {reason} {location}")]
    Decode {
        /// What could not be decoded.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation is not valid in the draft's current state.
    #[error("Cannot {action} while draft is {state:?} {location}")]
    InvalidTransition {
        /// The attempted operation.
        action: &'static str,
        /// State the draft was in.
        state: DraftStep,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Text suitable for showing to the user.
    ///
    /// Backend failures surface the backend's `detail` verbatim when present.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation { source, .. } => source.to_string(),
            ClientError::Backend { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ClientError::Transport { source, .. } => source.to_string(),
            ClientError::InvalidBaseUrl { url, reason, .. } => {
                format!("Invalid backend URL '{}': {}", url, reason)
            }
            ClientError::Decode { reason, .. } => reason.clone(),
            ClientError::InvalidTransition { action, state, .. } => {
                format!("Cannot {} while draft is {:?}", action, state)
            }
        }
    }

    /// The validation failure, if this error is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ClientError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for ClientError {
    #[track_caller]
    fn from(source: ValidationError) -> Self {
        ClientError::Validation {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

// Manual From<reqwest::Error> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        ClientError::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`ClientError`].
pub type Result<T> = StdResult<T, ClientError>;
