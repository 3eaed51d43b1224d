//! Error types for board commands.
//!
//! Every command either applies completely or is rejected without side
//! effects. A rejection falls in one of two categories:
//!
//! - **Not found**: the referenced story or resource is not where the
//!   command expected it.
//! - **Rule violation**: the transition table, a WIP limit, a stage
//!   prerequisite, or the resource-kind rule forbids the command.

use thiserror::Error;

use super::ids::{ResourceId, StoryId};
use super::stage::{ResourceKind, Stage, StageGroup};

/// Result type alias for board commands.
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Rejection reason for a board command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KanbanError {
    /// Story does not exist or is still hidden.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// Resource id is unknown.
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// Resource exists but is not in the available pool.
    #[error("resource not available: {0}")]
    ResourceNotAvailable(ResourceId),

    /// The transition table has no entry for this move.
    #[error("illegal transition for {story}: {from} -> {to}")]
    IllegalTransition { story: StoryId, from: Stage, to: Stage },

    /// The target stage group is at capacity.
    #[error("WIP limit reached for {story}: {group} allows {limit}")]
    WipLimitReached {
        story: StoryId,
        group: StageGroup,
        limit: usize,
    },

    /// The move is in the table but the story does not satisfy its guard.
    #[error("prerequisite not met for {story}: {reason}")]
    PrerequisiteNotMet { story: StoryId, reason: &'static str },

    /// Resource kind does not work the story's current stage.
    #[error("{kind} {resource} cannot work a story in {stage}")]
    KindMismatch {
        resource: ResourceId,
        kind: ResourceKind,
        stage: Stage,
    },

    /// Command issued after the last day.
    #[error("game over on day {day}")]
    GameOver { day: u32 },

    /// Column name does not name a stage.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KanbanError {
    /// Check if this rejection means a referenced object was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KanbanError::StoryNotFound(_)
                | KanbanError::ResourceNotFound(_)
                | KanbanError::ResourceNotAvailable(_)
        )
    }

    /// Check if this rejection came from a game rule.
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            KanbanError::IllegalTransition { .. }
                | KanbanError::WipLimitReached { .. }
                | KanbanError::PrerequisiteNotMet { .. }
                | KanbanError::KindMismatch { .. }
                | KanbanError::GameOver { .. }
        )
    }
}
