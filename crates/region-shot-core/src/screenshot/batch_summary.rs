use crate::CaptureResult;

use std::fmt;

/// Overall outcome of a batch capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every region was captured.
    FullSuccess,
    /// At least one region failed. Reported as a warning, never as an error.
    PartialSuccess {
        /// Regions captured.
        succeeded: usize,
        /// Regions attempted.
        total: usize,
    },
}

/// Per-region results of one batch capture, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    results: Vec<CaptureResult>,
}

impl BatchSummary {
    /// Wrap the per-region results.
    pub fn new(results: Vec<CaptureResult>) -> Self {
        Self { results }
    }

    /// Regions that were captured.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Regions attempted.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Aggregated outcome.
    pub fn status(&self) -> BatchStatus {
        let succeeded = self.success_count();
        let total = self.total();
        if succeeded == total {
            BatchStatus::FullSuccess
        } else {
            BatchStatus::PartialSuccess { succeeded, total }
        }
    }

    /// Whether every region was captured.
    pub fn is_full_success(&self) -> bool {
        self.status() == BatchStatus::FullSuccess
    }

    /// All results.
    pub fn results(&self) -> &[CaptureResult] {
        &self.results
    }

    /// Only the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &CaptureResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Take ownership of the results.
    pub fn into_results(self) -> Vec<CaptureResult> {
        self.results
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Screenshots complete: {}/{} succeeded",
            self.success_count(),
            self.total()
        )
    }
}
