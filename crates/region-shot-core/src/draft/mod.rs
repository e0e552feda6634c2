mod draft_machine;
mod draft_step;
mod region_draft;

pub use {
    draft_machine::{CaptureCancelled, RegionDraftMachine},
    draft_step::DraftStep,
    region_draft::{DraftField, RegionDraft, parse_coordinate},
};
