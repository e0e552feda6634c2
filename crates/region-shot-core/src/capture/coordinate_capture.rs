//! Hotkey coordinate acquisition.
//!
//! The backend records corners when its hotkeys are pressed and only exposes
//! them through `GET /mouse/captured-coords`. [`CoordinateCapture`] hides the
//! polling behind a per-session event stream: [`CoordinateCapture::start`]
//! returns a [`CaptureSubscription`] and every event it yields is tagged with
//! the session's [`SessionToken`].
//!
//! At most one poll loop is live. The current generation is published on a
//! `watch` channel; a loop whose generation is no longer current exits at its
//! next await point and drops any response it was waiting for.

use crate::{
    CaptureBackend, CapturedCoordinatePair,
    capture::{CaptureEvent, SessionEvent, SessionToken},
};

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, instrument, warn};

/// Interval between coordinate polls.
///
/// Trades hotkey-to-screen latency against backend load.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

const EVENT_BUFFER: usize = 16;

// tokio intervals reject a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Generation published when no session is active.
const NO_SESSION: u64 = 0;

/// Receiving end of one capture session.
#[derive(Debug)]
pub struct CaptureSubscription {
    token: SessionToken,
    events: mpsc::Receiver<SessionEvent>,
}

impl CaptureSubscription {
    /// Session this subscription belongs to.
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Next event, or `None` once the session has ended.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Next already-delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }
}

struct ActiveSession {
    token: SessionToken,
    handle: JoinHandle<()>,
}

/// Owns the poll loop for hotkey-captured coordinates.
pub struct CoordinateCapture<B> {
    backend: Arc<B>,
    interval: Duration,
    current: watch::Sender<u64>,
    next_generation: u64,
    active: Option<ActiveSession>,
}

impl<B: CaptureBackend> CoordinateCapture<B> {
    /// Create an idle capture client polling every `interval`.
    pub fn new(backend: Arc<B>, interval: Duration) -> Self {
        let (current, _) = watch::channel(NO_SESSION);
        Self {
            backend,
            interval: interval.max(MIN_POLL_INTERVAL),
            current,
            next_generation: NO_SESSION + 1,
            active: None,
        }
    }

    /// Begin a new session, stopping any previous one first.
    ///
    /// Must be called within a tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CaptureSubscription {
        self.stop();

        let token = SessionToken::new(self.next_generation);
        self.next_generation += 1;

        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        self.current.send_replace(token.generation());

        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.backend),
            token,
            self.interval,
            self.current.subscribe(),
            events_tx,
        ));

        self.active = Some(ActiveSession { token, handle });

        info!(
            generation = token.generation(),
            session_id = %token.session_id(),
            interval_ms = self.interval.as_millis(),
            "Coordinate capture started"
        );

        CaptureSubscription {
            token,
            events: events_rx,
        }
    }

    /// Stop the active session. Does nothing when already stopped.
    ///
    /// A request already in flight is allowed to finish; its response is discarded.
    pub fn stop(&mut self) {
        if let Some(session) = self.active.take() {
            self.current.send_replace(NO_SESSION);
            debug!(
                generation = session.token.generation(),
                session_id = %session.token.session_id(),
                "Coordinate capture stopped"
            );
        }
    }

    /// Whether a poll loop is still running for the current session.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|session| !session.handle.is_finished())
    }

    /// Token of the current session, if one was started and not stopped.
    pub fn current_token(&self) -> Option<SessionToken> {
        self.active.as_ref().map(|session| session.token)
    }

    /// Whether `token` belongs to the current session.
    pub fn is_current(&self, token: SessionToken) -> bool {
        self.current_token() == Some(token)
    }

    /// Configured poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<B> Drop for CoordinateCapture<B> {
    fn drop(&mut self) {
        // Dropping `current` also closes every receiver; this only makes the exit explicit.
        self.current.send_replace(NO_SESSION);
    }
}

async fn poll_loop<B: CaptureBackend>(
    backend: Arc<B>,
    token: SessionToken,
    interval: Duration,
    mut current: watch::Receiver<u64>,
    events: mpsc::Sender<SessionEvent>,
) {
    let generation = token.generation();
    let is_current = |current: &watch::Receiver<u64>| *current.borrow() == generation;

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    // A slow response delays the next tick instead of queueing a burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_seen = CapturedCoordinatePair::default();
    let mut connected = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = current.changed() => {
                if changed.is_err() || !is_current(&current) {
                    debug!(generation, "Poll loop exiting: session superseded");
                    return;
                }
                continue;
            }
        }

        let result = backend.captured_coords().await;

        if !is_current(&current) {
            debug!(generation, "Discarding poll response from superseded session");
            return;
        }

        let pair = match result {
            Ok(pair) => pair,
            Err(e) => {
                warn!(generation, error = ?e, "Coordinate poll failed, continuing");
                if !connected {
                    let event = CaptureEvent::PollFailed {
                        reason: e.user_message(),
                    };
                    if !emit(&events, token, event).await {
                        return;
                    }
                }
                continue;
            }
        };

        if !connected {
            connected = true;
            if !emit(&events, token, CaptureEvent::Connected).await {
                return;
            }
        }

        for (corner, point) in pair.corners() {
            if last_seen.get(corner) != Some(point) {
                debug!(generation, %corner, x = point.x, y = point.y, "Corner captured");
                if !emit(&events, token, CaptureEvent::CornerCaptured { corner, point }).await {
                    return;
                }
            }
        }
        last_seen = pair;

        if let (Some(top_left), Some(bottom_right)) = (pair.top_left, pair.bottom_right) {
            info!(generation, "Both corners captured, session complete");
            let _ = emit(
                &events,
                token,
                CaptureEvent::Completed {
                    top_left,
                    bottom_right,
                },
            )
            .await;
            return;
        }
    }
}

/// Deliver one event. Returns `false` once the subscriber is gone.
async fn emit(events: &mpsc::Sender<SessionEvent>, token: SessionToken, event: CaptureEvent) -> bool {
    let delivered = events.send(SessionEvent { token, event }).await.is_ok();
    if !delivered {
        debug!(generation = token.generation(), "Subscriber dropped, poll loop exiting");
    }
    delivered
}
