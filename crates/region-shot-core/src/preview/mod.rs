mod preview_manager;

pub use preview_manager::{PreviewHandle, PreviewManager, PreviewTarget};
