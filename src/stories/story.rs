//! Story records - runtime story state.
//!
//! A `Story` is created once from a catalog entry and lives for the whole
//! game. It tracks its stage, remaining effort per phase, the resources
//! currently working it, and how long it has waited in `prioritized`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ids::{ResourceId, StoryId};
use crate::core::stage::{ResourceKind, Stage};

/// Effort points per phase.
///
/// Phases are keyed by the resource kind that performs them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effort {
    pub analysis: u32,
    pub development: u32,
    pub testing: u32,
}

impl Effort {
    /// Create an effort triple.
    #[must_use]
    pub const fn new(analysis: u32, development: u32, testing: u32) -> Self {
        Self {
            analysis,
            development,
            testing,
        }
    }

    /// Effort for the phase worked by `kind`.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Analyst => self.analysis,
            ResourceKind::Developer => self.development,
            ResourceKind::Tester => self.testing,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Analyst => &mut self.analysis,
            ResourceKind::Developer => &mut self.development,
            ResourceKind::Tester => &mut self.testing,
        }
    }

    /// Subtract `amount` from a phase, floored at 0.
    ///
    /// Returns the effort actually removed.
    pub fn reduce(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let field = self.get_mut(kind);
        let removed = amount.min(*field);
        *field -= removed;
        removed
    }

    /// Zero a phase.
    pub fn clear(&mut self, kind: ResourceKind) {
        *self.get_mut(kind) = 0;
    }
}

/// A work item on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,

    pub description: String,

    /// Earned every round while deployed.
    pub price: u64,

    /// Remaining effort. Never increases.
    pub effort: Effort,

    /// Effort at creation, for progress display.
    pub original_effort: Effort,

    pub stage: Stage,

    /// Resources currently working this story, in allocation order.
    pub allocated: SmallVec<[ResourceId; 4]>,

    /// Rounds completed while in `prioritized`.
    pub days_in_stage: u32,
}

impl Story {
    /// Create a hidden story.
    #[must_use]
    pub fn new(id: StoryId, description: impl Into<String>, price: u64, effort: Effort) -> Self {
        Self {
            id,
            description: description.into(),
            price,
            effort,
            original_effort: effort,
            stage: Stage::Hidden,
            allocated: SmallVec::new(),
            days_in_stage: 0,
        }
    }

    /// Check if the story is on the board.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.stage.is_revealed()
    }

    /// Remaining effort for the current in-progress stage.
    ///
    /// `None` when the story is not in progress.
    #[must_use]
    pub fn current_effort(&self) -> Option<u32> {
        self.stage.work_kind().map(|kind| self.effort.get(kind))
    }

    /// Check if the current in-progress phase has no effort left.
    #[must_use]
    pub fn phase_complete(&self) -> bool {
        self.current_effort() == Some(0)
    }

    /// Check if `resource` is allocated to this story.
    #[must_use]
    pub fn holds(&self, resource: ResourceId) -> bool {
        self.allocated.contains(&resource)
    }

    /// Add a resource to the allocation set.
    ///
    /// Returns `false` if it was already present.
    pub fn attach(&mut self, resource: ResourceId) -> bool {
        if self.holds(resource) {
            return false;
        }
        self.allocated.push(resource);
        true
    }

    /// Remove a resource from the allocation set.
    ///
    /// Returns `false` if it was not present.
    pub fn detach(&mut self, resource: ResourceId) -> bool {
        let before = self.allocated.len();
        self.allocated.retain(|r| *r != resource);
        self.allocated.len() != before
    }

    /// Clear the allocation set, returning what was held.
    pub fn take_allocated(&mut self) -> SmallVec<[ResourceId; 4]> {
        std::mem::take(&mut self.allocated)
    }
}
