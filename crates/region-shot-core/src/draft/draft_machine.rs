//! Region draft lifecycle.
//!
//! [`RegionDraftMachine`] owns one draft from creation to save or cancel. In
//! `Capturing` it holds the only [`CaptureSubscription`] for the draft and
//! applies events from the current session; events from any other session
//! are dropped. Leaving `Capturing` for any reason stops the poll loop.

use crate::{
    CaptureBackend, CaptureEvent, CaptureSubscription, ClientError, CoordinateCapture, Corner,
    CoreResult, DraftField, DraftStep, PreviewHandle, PreviewManager, PreviewTarget, Region,
    RegionDraft, RegionRepository, SessionEvent, SessionToken, ValidationError,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Outcome of [`RegionDraftMachine::cancel_capture`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureCancelled {
    /// Last poll error, reported only when no poll of the session ever succeeded.
    pub poll_failure: Option<String>,
}

/// Corners recorded during the current or most recent capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CornerProgress {
    top_left: bool,
    bottom_right: bool,
}

impl CornerProgress {
    fn mark(&mut self, corner: Corner) {
        match corner {
            Corner::TopLeft => self.top_left = true,
            Corner::BottomRight => self.bottom_right = true,
        }
    }

    fn missing_axes(self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if !self.top_left {
            missing.extend(DraftField::axes(Corner::TopLeft));
        }
        if !self.bottom_right {
            missing.extend(DraftField::axes(Corner::BottomRight));
        }
        missing
    }
}

#[derive(Debug, Default)]
struct PollHealth {
    connected: bool,
    last_failure: Option<String>,
}

/// State machine driving creation or edit of one region.
pub struct RegionDraftMachine<B> {
    backend: Arc<B>,
    draft: RegionDraft,
    step: DraftStep,
    saved: Option<Region>,
    regions: RegionRepository<B>,
    capture: CoordinateCapture<B>,
    subscription: Option<CaptureSubscription>,
    coordinates_before_capture: Option<(i32, i32, i32, i32)>,
    progress: CornerProgress,
    missing: Vec<DraftField>,
    health: PollHealth,
    preview: PreviewManager<B>,
}

impl<B: CaptureBackend> RegionDraftMachine<B> {
    /// Start a new, unsaved draft in `Form`.
    pub fn new(backend: Arc<B>, poll_interval: Duration) -> Self {
        Self::with_draft(backend, poll_interval, RegionDraft::default())
    }

    /// Start editing a persisted region in `Form`.
    pub fn edit(backend: Arc<B>, poll_interval: Duration, region: Region) -> Self {
        Self::with_draft(backend, poll_interval, RegionDraft::from(region))
    }

    fn with_draft(backend: Arc<B>, poll_interval: Duration, draft: RegionDraft) -> Self {
        Self {
            regions: RegionRepository::new(Arc::clone(&backend)),
            capture: CoordinateCapture::new(Arc::clone(&backend), poll_interval),
            preview: PreviewManager::new(Arc::clone(&backend)),
            backend,
            draft,
            step: DraftStep::Form,
            saved: None,
            subscription: None,
            coordinates_before_capture: None,
            progress: CornerProgress::default(),
            missing: Vec::new(),
            health: PollHealth::default(),
        }
    }

    /// Current step.
    pub fn step(&self) -> DraftStep {
        self.step
    }

    /// The draft as currently edited.
    pub fn draft(&self) -> &RegionDraft {
        &self.draft
    }

    /// The persisted region, once saved.
    pub fn saved(&self) -> Option<&Region> {
        self.saved.as_ref()
    }

    /// Preview on display, if one rendered.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.current()
    }

    /// Preview handles still alive. At most one.
    pub fn live_previews(&self) -> usize {
        self.preview.live_handles()
    }

    /// Corners an early-finished capture never recorded and that still
    /// have at least one coordinate not typed in by hand.
    pub fn missing_corners(&self) -> Vec<Corner> {
        [Corner::TopLeft, Corner::BottomRight]
            .into_iter()
            .filter(|corner| {
                DraftField::axes(*corner)
                    .iter()
                    .any(|field| self.missing.contains(field))
            })
            .collect()
    }

    /// Coordinate fields that must be set by hand before saving.
    pub fn missing_fields(&self) -> &[DraftField] {
        &self.missing
    }

    /// Token of the running capture session.
    pub fn session(&self) -> Option<SessionToken> {
        self.capture.current_token()
    }

    /// Whether a poll loop is running.
    pub fn is_polling(&self) -> bool {
        self.capture.is_active()
    }

    #[track_caller]
    fn invalid(&self, action: &'static str) -> ClientError {
        ClientError::InvalidTransition {
            action,
            state: self.step,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Enter `Capturing`.
    ///
    /// Clears the backend's captured corners and starts a new capture
    /// session. Only unsaved drafts may capture. Calling this while already
    /// capturing restarts the session; the previous poll loop is stopped first.
    #[instrument(skip(self), fields(step = ?self.step))]
    pub async fn start_capture(&mut self) -> CoreResult<SessionToken> {
        if self.draft.id.is_some() {
            return Err(self.invalid("capture corners of a saved region"));
        }
        if !matches!(self.step, DraftStep::Form | DraftStep::Capturing) {
            return Err(self.invalid("start capture"));
        }

        self.capture.stop();
        self.subscription = None;

        let before = *self
            .coordinates_before_capture
            .get_or_insert(self.draft.coordinates());
        // A restarted session begins from the pre-capture coordinates too.
        self.draft.restore_coordinates(before);

        if let Err(e) = self.backend.clear_captured_coords().await {
            warn!(error = ?e, "Failed to clear captured coordinates, capture not started");
            self.draft.restore_coordinates(before);
            self.coordinates_before_capture = None;
            self.step = DraftStep::Form;
            return Err(e);
        }

        self.progress = CornerProgress::default();
        self.missing.clear();
        self.health = PollHealth::default();

        let subscription = self.capture.start();
        let token = subscription.token();
        self.subscription = Some(subscription);
        self.step = DraftStep::Capturing;

        info!(session = %token, "Capture session started");

        Ok(token)
    }

    /// Wait for and apply the next event of the running capture session.
    ///
    /// A `Completed` event moves the draft to `Preview` before returning.
    /// Returns `None` when not capturing or once the session has ended.
    pub async fn next_capture_event(&mut self) -> Option<CaptureEvent> {
        loop {
            if self.step != DraftStep::Capturing {
                return None;
            }
            let SessionEvent { token, event } = self.subscription.as_mut()?.recv().await?;
            if !self.capture.is_current(token) {
                debug!(session = %token, "Ignoring event from superseded session");
                continue;
            }

            self.apply(&event);
            if matches!(event, CaptureEvent::Completed { .. }) {
                self.enter_preview().await;
            }
            return Some(event);
        }
    }

    fn apply(&mut self, event: &CaptureEvent) {
        match event {
            CaptureEvent::Connected => {
                self.health.connected = true;
                self.health.last_failure = None;
            }
            CaptureEvent::PollFailed { reason } => {
                if !self.health.connected {
                    self.health.last_failure = Some(reason.clone());
                }
            }
            CaptureEvent::CornerCaptured { corner, point } => {
                self.draft.set_corner(*corner, *point);
                self.progress.mark(*corner);
            }
            CaptureEvent::Completed {
                top_left,
                bottom_right,
            } => {
                self.draft.set_corner(Corner::TopLeft, *top_left);
                self.draft.set_corner(Corner::BottomRight, *bottom_right);
                self.progress.mark(Corner::TopLeft);
                self.progress.mark(Corner::BottomRight);
            }
        }
    }

    /// Stop the session and apply whatever it already delivered.
    fn end_session(&mut self, apply_coordinates: bool) {
        self.capture.stop();
        let Some(mut subscription) = self.subscription.take() else {
            return;
        };
        let token = subscription.token();
        while let Some(session_event) = subscription.try_recv() {
            if session_event.token != token {
                continue;
            }
            match session_event.event {
                CaptureEvent::CornerCaptured { .. } | CaptureEvent::Completed { .. }
                    if !apply_coordinates => {}
                event => self.apply(&event),
            }
        }
    }

    async fn enter_preview(&mut self) {
        self.end_session(true);
        self.coordinates_before_capture = None;
        self.missing = self.progress.missing_axes();
        self.step = DraftStep::Preview;

        if !self.missing.is_empty() {
            warn!(missing = ?self.missing_corners(), "Capture finished without every corner");
        }
        info!(coordinates = ?self.draft.coordinates(), "Entered preview");

        self.refresh_preview().await;
    }

    /// Finish capturing now, whether or not both corners arrived.
    ///
    /// Performs one final coordinate read before entering `Preview`. Corners
    /// still missing afterwards keep their previous values and block
    /// [`save`](Self::save) until edited.
    #[instrument(skip(self))]
    pub async fn finish_capture(&mut self) -> CoreResult<()> {
        if self.step != DraftStep::Capturing {
            return Err(self.invalid("finish capture"));
        }

        self.end_session(true);

        match self.backend.captured_coords().await {
            Ok(pair) => {
                for (corner, point) in pair.corners() {
                    self.draft.set_corner(corner, point);
                    self.progress.mark(corner);
                }
            }
            Err(e) => warn!(error = ?e, "Final coordinate read failed"),
        }

        self.enter_preview().await;
        Ok(())
    }

    /// Abandon the capture session and return to `Form`.
    ///
    /// Always asks the backend to clear its captured corners and restores the
    /// coordinates the draft had before capture began.
    #[instrument(skip(self))]
    pub async fn cancel_capture(&mut self) -> CoreResult<CaptureCancelled> {
        if self.step != DraftStep::Capturing {
            return Err(self.invalid("cancel capture"));
        }

        self.end_session(false);

        if let Err(e) = self.backend.clear_captured_coords().await {
            warn!(error = ?e, "Failed to clear captured coordinates");
        }

        if let Some(before) = self.coordinates_before_capture.take() {
            self.draft.restore_coordinates(before);
        }
        self.progress = CornerProgress::default();
        self.missing.clear();
        self.step = DraftStep::Form;

        let poll_failure = if self.health.connected {
            None
        } else {
            self.health.last_failure.take()
        };

        info!(poll_failure = ?poll_failure, "Capture cancelled");

        Ok(CaptureCancelled { poll_failure })
    }

    /// Edit one field from raw user input.
    ///
    /// In `Preview`, coordinate edits re-render the preview.
    #[instrument(skip(self))]
    pub async fn edit_field(&mut self, field: DraftField, value: &str) -> CoreResult<()> {
        if !self.step.is_editable() {
            return Err(self.invalid("edit"));
        }

        self.draft.set_field(field, value);

        if field.corner().is_some() {
            self.missing.retain(|missing| *missing != field);
            if self.step == DraftStep::Preview {
                self.refresh_preview().await;
            }
        }

        Ok(())
    }

    /// Render a preview of the draft as it stands.
    ///
    /// Persisted regions use the stored render; unsaved drafts are rendered
    /// from their coordinates.
    #[instrument(skip(self))]
    pub async fn load_preview(&mut self) -> CoreResult<Option<&PreviewHandle>> {
        if !self.step.is_editable() {
            return Err(self.invalid("load preview"));
        }
        self.refresh_preview().await;
        Ok(self.preview.current())
    }

    async fn refresh_preview(&mut self) {
        let target = match &self.draft.id {
            Some(id) => PreviewTarget::Stored(id.clone()),
            None => PreviewTarget::Draft(self.draft.payload()),
        };
        if self.preview.request(target).await.is_none() {
            debug!("No preview available");
        }
    }

    /// Leave `Preview` for `Form`, keeping the draft.
    pub fn back_to_form(&mut self) -> CoreResult<()> {
        if self.step != DraftStep::Preview {
            return Err(self.invalid("return to form"));
        }
        self.preview.release();
        self.step = DraftStep::Form;
        Ok(())
    }

    /// Validate and persist the draft.
    ///
    /// Checks the name, then capture completeness, then area. A failed check
    /// makes no request. Backend failures leave the draft where it was.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> CoreResult<Region> {
        if !self.step.is_editable() {
            return Err(self.invalid("save"));
        }

        self.validate()?;

        let payload = self.draft.payload();
        let region = match &self.draft.id {
            Some(id) => self.regions.update(id, &payload).await?,
            None => self.regions.create(&payload).await?,
        };

        self.preview.release();
        self.draft.id = Some(region.id.clone());
        self.saved = Some(region.clone());
        self.step = DraftStep::Saved;

        Ok(region)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.draft.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if !self.missing.is_empty() {
            let missing = self
                .missing_corners()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ValidationError::IncompleteCapture { missing });
        }
        self.draft.validate()
    }

    /// Discard the draft. Nothing is sent to the backend.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.step.is_terminal() {
            return Err(self.invalid("cancel"));
        }
        self.end_session(false);
        self.preview.release();
        self.step = DraftStep::Cancelled;
        info!("Draft cancelled");
        Ok(())
    }
}
