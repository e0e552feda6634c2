mod batch_summary;
mod orchestrator;

pub use {
    batch_summary::{BatchStatus, BatchSummary},
    orchestrator::ScreenshotOrchestrator,
};
