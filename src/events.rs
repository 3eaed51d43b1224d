//! Board events.
//!
//! Every accepted command appends one or more `BoardEvent`s to the
//! `EventLog`. Presentation layers keep a cursor and redraw from
//! `events_since(cursor)` after each command; the core never calls out.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::PlayMode;
use crate::core::ids::{ResourceId, StoryId};
use crate::core::stage::Stage;

/// Where a resource was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Holder {
    Pool,
    Story(StoryId),
}

/// Something that happened on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BoardEvent {
    /// A hidden story entered the backlog.
    StoryRevealed { story: StoryId },

    /// A story changed stage.
    StoryMoved {
        story: StoryId,
        from: Stage,
        to: Stage,
    },

    /// A resource was attached to a story.
    ResourceAllocated {
        resource: ResourceId,
        from: Holder,
        to: StoryId,
    },

    /// A resource went back to the available pool.
    ResourceReturned {
        resource: ResourceId,
        from: StoryId,
    },

    /// One resource worked a story for one round.
    ///
    /// `applied` is zero when the resource kind did not match the stage.
    EffortApplied {
        story: StoryId,
        resource: ResourceId,
        delivered: u32,
        applied: u32,
    },

    /// An in-progress phase reached zero effort during a round.
    PhaseCompleted {
        story: StoryId,
        from: Stage,
        to: Stage,
    },

    /// Deployed stories paid out.
    ProfitAccrued { amount: u64, total: u64 },

    /// The clock advanced.
    RoundCompleted { day: u32 },

    /// Sandbox mode was toggled.
    ModeChanged { mode: PlayMode },
}

/// Append-only event history.
///
/// Uses `im::Vector` so snapshots of the board clone in O(1).
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vector<BoardEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&mut self, event: BoardEvent) {
        self.events.push_back(event);
    }

    /// Events recorded at or after `cursor`.
    ///
    /// Pass the previous `len()` as the cursor to read only new events.
    pub fn events_since(&self, cursor: usize) -> impl Iterator<Item = &BoardEvent> {
        self.events.iter().skip(cursor)
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&BoardEvent> {
        self.events.last()
    }
}
