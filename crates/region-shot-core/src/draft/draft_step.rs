/// Lifecycle of a region draft.
///
/// `Form -> Capturing -> Preview -> (Form | Saved)`, with `Cancelled`
/// reachable from every non-terminal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    /// Manual numeric entry. Initial step.
    Form,
    /// Hotkey-driven corner acquisition in progress.
    Capturing,
    /// Coordinates finalised and a preview requested; still editable.
    Preview,
    /// Persisted. Terminal.
    Saved,
    /// Discarded without touching the backend. Terminal.
    Cancelled,
}

impl DraftStep {
    /// No further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, DraftStep::Saved | DraftStep::Cancelled)
    }

    /// Fields may be edited and the draft saved.
    pub fn is_editable(self) -> bool {
        matches!(self, DraftStep::Form | DraftStep::Preview)
    }
}
