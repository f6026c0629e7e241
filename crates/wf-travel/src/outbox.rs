use serde::{Deserialize, Serialize};

use wf_core::LocationId;

use crate::roller::TravelEvent;
use crate::scheduler::{WorldEventId, WorldEventKind};

/// What kind of notice occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A journey left its starting location.
    TravelStarted {
        /// The destination.
        to: LocationId,
    },
    /// A waypoint on the route was reached.
    WaypointReached {
        /// The waypoint.
        at: LocationId,
    },
    /// The journey reached its destination.
    TravelArrived {
        /// The destination.
        at: LocationId,
    },
    /// The journey was cancelled mid-way.
    TravelCancelled,
    /// An encounter interrupted travel and awaits resolution.
    EncounterTriggered {
        /// The encounter, as handed to the host.
        event: TravelEvent,
    },
    /// A location's reveal state advanced.
    LocationRevealed {
        /// The location.
        location: LocationId,
    },
    /// A world event spawned.
    WorldEventSpawned {
        /// The event id.
        id: WorldEventId,
        /// The event kind.
        kind: WorldEventKind,
    },
    /// A world event finished.
    WorldEventCompleted {
        /// The event id.
        id: WorldEventId,
    },
}

/// A timestamped notice for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Game minute the notice was emitted.
    pub minute: f64,
    /// What happened.
    pub kind: NoticeKind,
    /// A human-readable description.
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(minute: f64, kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            minute,
            kind,
            message: message.into(),
        }
    }
}

/// Accumulates notices for the host loop to drain each tick.
///
/// This replaces any event-bus machinery: the simulation pushes here,
/// the host pulls, and nothing is delivered implicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outbox {
    notices: Vec<Notice>,
    max_notices: usize,
}

impl Outbox {
    /// Create an outbox with the given capacity (0 = unlimited). The
    /// oldest notices are dropped past the cap.
    pub fn new(max_notices: usize) -> Self {
        Self {
            notices: Vec::new(),
            max_notices,
        }
    }

    /// Append a notice, trimming the oldest past capacity.
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.max_notices > 0 && self.notices.len() > self.max_notices {
            let excess = self.notices.len() - self.max_notices;
            self.notices.drain(..excess);
        }
    }

    /// Emit a notice at the given minute.
    pub fn emit(&mut self, minute: f64, kind: NoticeKind, message: impl Into<String>) {
        self.push(Notice::new(minute, kind, message));
    }

    /// All pending notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every pending notice, leaving the outbox empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Number of pending notices.
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Whether there are no pending notices.
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut outbox = Outbox::new(0);
        outbox.emit(1.0, NoticeKind::TravelCancelled, "gave up");
        outbox.emit(
            2.0,
            NoticeKind::TravelArrived { at: LocationId(3) },
            "made it",
        );
        assert_eq!(outbox.len(), 2);

        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert!(outbox.is_empty());
        assert_eq!(drained[0].minute, 1.0);
    }

    #[test]
    fn capacity_trims_oldest() {
        let mut outbox = Outbox::new(2);
        for i in 0..5 {
            outbox.emit(f64::from(i), NoticeKind::TravelCancelled, "x");
        }
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox.notices()[0].minute, 3.0);
        assert_eq!(outbox.notices()[1].minute, 4.0);
    }

    #[test]
    fn zero_capacity_is_unlimited() {
        let mut outbox = Outbox::new(0);
        for i in 0..100 {
            outbox.emit(f64::from(i), NoticeKind::TravelCancelled, "x");
        }
        assert_eq!(outbox.len(), 100);
    }
}
