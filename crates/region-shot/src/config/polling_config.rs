use crate::config::default_poll_interval_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Coordinate capture polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Milliseconds between captured-coordinate polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PollingConfig {
    /// Poll interval as a [`Duration`]. Zero is raised to one millisecond.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
