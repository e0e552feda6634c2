use crate::{Corner, Point};

use std::fmt;

use uuid::Uuid;

/// Identifies one capture session.
///
/// Generations increase monotonically per [`CoordinateCapture`](crate::CoordinateCapture);
/// the UUID correlates log lines across components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken {
    generation: u64,
    session_id: Uuid,
}

impl SessionToken {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            session_id: Uuid::new_v4(),
        }
    }

    /// Monotonic generation number, never zero.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Unique id for log correlation.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.generation, self.session_id)
    }
}

/// Progress reported by a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// First successful poll of the session.
    Connected,
    /// A poll failed before any poll had succeeded.
    PollFailed {
        /// Error text of the failed poll.
        reason: String,
    },
    /// A corner was recorded or moved.
    CornerCaptured {
        /// Which corner.
        corner: Corner,
        /// Where.
        point: Point,
    },
    /// Both corners are present; the session has stopped itself.
    Completed {
        /// Recorded top-left corner.
        top_left: Point,
        /// Recorded bottom-right corner.
        bottom_right: Point,
    },
}

/// A [`CaptureEvent`] tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Producing session.
    pub token: SessionToken,
    /// What happened.
    pub event: CaptureEvent,
}
