//! Stage transition engine.
//!
//! A move is checked in two steps, capacity first:
//!
//! 1. **WIP capacity**: the target's stage group must have room, unless the
//!    story is already inside that group. Analysis and development each
//!    share one limit across their in-progress and done columns.
//! 2. **Transition table**: the (from, to) pair must be listed, and the
//!    story must satisfy the pair's guard.
//!
//! Sandbox mode skips both steps.

use tracing::debug;

use crate::core::config::{PlayMode, WipLimits};
use crate::core::error::{KanbanError, Result};
use crate::core::ids::StoryId;
use crate::core::stage::{ResourceKind, Stage};
use crate::core::state::BoardState;
use crate::events::BoardEvent;
use crate::stories::{Story, StoryRegistry};

/// Rounds a story must wait in `prioritized` before analysis starts.
pub const MIN_DAYS_PRIORITIZED: u32 = 1;

/// Precondition attached to a legal transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Always allowed.
    None,
    /// Story must have waited this many rounds in its current stage.
    DaysInStage(u32),
    /// The phase worked by this kind must have no effort left.
    PhaseComplete(ResourceKind),
}

/// The normal-mode transition table.
pub const TRANSITIONS: [(Stage, Stage, Guard); 7] = [
    (Stage::Backlog, Stage::Prioritized, Guard::None),
    (
        Stage::Prioritized,
        Stage::AnalyzedInProgress,
        Guard::DaysInStage(MIN_DAYS_PRIORITIZED),
    ),
    (
        Stage::AnalyzedInProgress,
        Stage::AnalyzedDone,
        Guard::PhaseComplete(ResourceKind::Analyst),
    ),
    (Stage::AnalyzedDone, Stage::DevelopedInProgress, Guard::None),
    (
        Stage::DevelopedInProgress,
        Stage::DevelopedDone,
        Guard::PhaseComplete(ResourceKind::Developer),
    ),
    (Stage::DevelopedDone, Stage::Testing, Guard::None),
    (
        Stage::Testing,
        Stage::Deployed,
        Guard::PhaseComplete(ResourceKind::Tester),
    ),
];

/// Look up the guard for a transition.
///
/// `None` if the pair is not in the table.
#[must_use]
pub fn guard_for(from: Stage, to: Stage) -> Option<Guard> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, guard)| *guard)
}

/// Validates and applies stage moves.
///
/// Holds only the WIP limits; board data is passed to every call.
///
/// ## Example
///
/// ```
/// use kanban_sim::core::{BoardConfig, BoardState, PlayMode, Stage, StoryId, WipLimits};
/// use kanban_sim::rules::TransitionEngine;
///
/// let mut state = BoardState::new(&BoardConfig::default()).unwrap();
/// let engine = TransitionEngine::new(WipLimits::default());
///
/// let story = StoryId::new(1);
/// assert!(engine.attempt_move(&mut state, story, Stage::Prioritized, PlayMode::Normal).is_ok());
///
/// // Must wait a round before analysis
/// assert!(engine.attempt_move(&mut state, story, Stage::AnalyzedInProgress, PlayMode::Normal).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionEngine {
    limits: WipLimits,
}

impl TransitionEngine {
    /// Create an engine enforcing `limits`.
    #[must_use]
    pub fn new(limits: WipLimits) -> Self {
        Self { limits }
    }

    /// WIP limits in force.
    #[must_use]
    pub fn limits(&self) -> &WipLimits {
        &self.limits
    }

    /// Check a move without applying it.
    pub fn validate(
        &self,
        stories: &StoryRegistry,
        id: StoryId,
        target: Stage,
        mode: PlayMode,
    ) -> Result<()> {
        let story = stories.require(id)?;

        if target == Stage::Hidden {
            return Err(KanbanError::IllegalTransition {
                story: id,
                from: story.stage,
                to: target,
            });
        }
        if mode.is_sandbox() {
            return Ok(());
        }

        self.check_capacity(stories, story, target)?;
        check_table(story, target)
    }

    /// Move a story to `target`.
    ///
    /// On success returns the stage the story left. On rejection the board
    /// is untouched. Entering `prioritized` from the backlog resets the
    /// story's day counter.
    pub fn attempt_move(
        &self,
        state: &mut BoardState,
        id: StoryId,
        target: Stage,
        mode: PlayMode,
    ) -> Result<Stage> {
        if let Err(err) = self.validate(&state.stories, id, target, mode) {
            debug!(story = %id, %target, ?mode, error = %err, "move rejected");
            return Err(err);
        }

        let story = state.stories.require_mut(id)?;
        let from = story.stage;
        if from == target {
            return Ok(from);
        }

        if !mode.is_sandbox() && from == Stage::Backlog && target == Stage::Prioritized {
            story.days_in_stage = 0;
        }
        story.stage = target;

        debug!(story = %id, %from, to = %target, ?mode, "story moved");
        state.events.record(BoardEvent::StoryMoved {
            story: id,
            from,
            to: target,
        });
        Ok(from)
    }

    /// Board columns the story could legally move to right now.
    pub fn legal_targets(
        &self,
        stories: &StoryRegistry,
        id: StoryId,
        mode: PlayMode,
    ) -> Vec<Stage> {
        let Some(story) = stories.find_by_id(id) else {
            return Vec::new();
        };
        Stage::BOARD
            .into_iter()
            .filter(|&target| target != story.stage)
            .filter(|&target| self.validate(stories, id, target, mode).is_ok())
            .collect()
    }

    fn check_capacity(&self, stories: &StoryRegistry, story: &Story, target: Stage) -> Result<()> {
        if target == Stage::Deployed {
            if story.stage != Stage::Testing {
                return Err(KanbanError::IllegalTransition {
                    story: story.id,
                    from: story.stage,
                    to: target,
                });
            }
            if story.effort.testing > 0 {
                return Err(KanbanError::PrerequisiteNotMet {
                    story: story.id,
                    reason: "testing effort remaining",
                });
            }
            return Ok(());
        }

        let Some(group) = target.wip_group() else {
            return Ok(());
        };
        // Moves within a group never change its count
        if story.stage.wip_group() == Some(group) {
            return Ok(());
        }

        let limit = self.limits.limit(group);
        if stories.count_in_group(group) >= limit {
            return Err(KanbanError::WipLimitReached {
                story: story.id,
                group,
                limit,
            });
        }
        Ok(())
    }
}

fn check_table(story: &Story, target: Stage) -> Result<()> {
    let guard = guard_for(story.stage, target).ok_or(KanbanError::IllegalTransition {
        story: story.id,
        from: story.stage,
        to: target,
    })?;

    match guard {
        Guard::None => Ok(()),
        Guard::DaysInStage(days) if story.days_in_stage < days => {
            Err(KanbanError::PrerequisiteNotMet {
                story: story.id,
                reason: "not enough days in stage",
            })
        }
        Guard::PhaseComplete(kind) if story.effort.get(kind) > 0 => {
            Err(KanbanError::PrerequisiteNotMet {
                story: story.id,
                reason: "phase effort remaining",
            })
        }
        Guard::DaysInStage(_) | Guard::PhaseComplete(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoardConfig;
    use crate::core::stage::StageGroup;

    fn board() -> (BoardState, TransitionEngine) {
        let state = BoardState::new(&BoardConfig::default()).unwrap();
        (state, TransitionEngine::new(WipLimits::default()))
    }

    fn place(state: &mut BoardState, id: u32, stage: Stage) {
        state.stories.require_mut(StoryId::new(id)).unwrap().stage = stage;
    }

    #[test]
    fn test_guard_lookup() {
        assert_eq!(guard_for(Stage::Backlog, Stage::Prioritized), Some(Guard::None));
        assert_eq!(
            guard_for(Stage::Testing, Stage::Deployed),
            Some(Guard::PhaseComplete(ResourceKind::Tester))
        );
        assert_eq!(guard_for(Stage::Backlog, Stage::Testing), None);
        assert_eq!(guard_for(Stage::AnalyzedDone, Stage::AnalyzedInProgress), None);
    }

    #[test]
    fn test_backlog_to_prioritized_resets_days() {
        let (mut state, engine) = board();
        let id = StoryId::new(1);
        state.stories.require_mut(id).unwrap().days_in_stage = 7;

        let from = engine
            .attempt_move(&mut state, id, Stage::Prioritized, PlayMode::Normal)
            .unwrap();

        assert_eq!(from, Stage::Backlog);
        let story = state.stories.require(id).unwrap();
        assert_eq!(story.stage, Stage::Prioritized);
        assert_eq!(story.days_in_stage, 0);
    }

    #[test]
    fn test_prioritized_needs_a_day() {
        let (mut state, engine) = board();
        let id = StoryId::new(1);
        place(&mut state, id.raw(), Stage::Prioritized);

        let err = engine
            .attempt_move(&mut state, id, Stage::AnalyzedInProgress, PlayMode::Normal)
            .unwrap_err();
        assert!(matches!(err, KanbanError::PrerequisiteNotMet { .. }));

        state.stories.require_mut(id).unwrap().days_in_stage = 1;
        assert!(engine
            .attempt_move(&mut state, id, Stage::AnalyzedInProgress, PlayMode::Normal)
            .is_ok());
    }

    #[test]
    fn test_phase_guard() {
        let (mut state, engine) = board();
        let id = StoryId::new(1);
        place(&mut state, 1, Stage::DevelopedInProgress);

        assert!(engine
            .attempt_move(&mut state, id, Stage::DevelopedDone, PlayMode::Normal)
            .is_err());

        state.stories.require_mut(id).unwrap().effort.development = 0;
        assert!(engine
            .attempt_move(&mut state, id, Stage::DevelopedDone, PlayMode::Normal)
            .is_ok());
    }

    #[test]
    fn test_unlisted_move_rejected_without_side_effects() {
        let (mut state, engine) = board();
        let events_before = state.events.len();

        let err = engine
            .attempt_move(&mut state, StoryId::new(1), Stage::Testing, PlayMode::Normal)
            .unwrap_err();

        assert!(matches!(err, KanbanError::IllegalTransition { .. }));
        assert_eq!(state.stories.require(StoryId::new(1)).unwrap().stage, Stage::Backlog);
        assert_eq!(state.events.len(), events_before);
    }

    #[test]
    fn test_backwards_move_rejected() {
        let (mut state, engine) = board();
        place(&mut state, 1, Stage::AnalyzedDone);

        assert!(engine
            .attempt_move(&mut state, StoryId::new(1), Stage::Prioritized, PlayMode::Normal)
            .is_err());
    }

    #[test]
    fn test_prioritized_limit() {
        let (mut state, engine) = board();
        for id in 1..=3 {
            engine
                .attempt_move(&mut state, StoryId::new(id), Stage::Prioritized, PlayMode::Normal)
                .unwrap();
        }

        let err = engine
            .attempt_move(&mut state, StoryId::new(4), Stage::Prioritized, PlayMode::Normal)
            .unwrap_err();
        assert_eq!(
            err,
            KanbanError::WipLimitReached {
                story: StoryId::new(4),
                group: StageGroup::Prioritized,
                limit: 3,
            }
        );
    }

    #[test]
    fn test_combined_analysis_limit() {
        let mut state = BoardState::new(&BoardConfig::default()).unwrap();
        state.stories.replenish_backlog(10);
        let engine = TransitionEngine::default();

        place(&mut state, 1, Stage::AnalyzedInProgress);
        place(&mut state, 2, Stage::AnalyzedInProgress);
        place(&mut state, 3, Stage::AnalyzedDone);
        place(&mut state, 4, Stage::AnalyzedDone);
        place(&mut state, 5, Stage::Prioritized);
        state.stories.require_mut(StoryId::new(5)).unwrap().days_in_stage = 3;

        let err = engine
            .attempt_move(&mut state, StoryId::new(5), Stage::AnalyzedInProgress, PlayMode::Normal)
            .unwrap_err();
        assert!(matches!(
            err,
            KanbanError::WipLimitReached { group: StageGroup::Analysis, limit: 4, .. }
        ));

        // Moving within the group is exempt
        state.stories.require_mut(StoryId::new(1)).unwrap().effort.analysis = 0;
        assert!(engine
            .attempt_move(&mut state, StoryId::new(1), Stage::AnalyzedDone, PlayMode::Normal)
            .is_ok());
    }

    #[test]
    fn test_combined_development_limit() {
        let (mut state, engine) = board();
        place(&mut state, 1, Stage::DevelopedInProgress);
        place(&mut state, 2, Stage::DevelopedDone);
        place(&mut state, 3, Stage::DevelopedDone);
        place(&mut state, 4, Stage::AnalyzedDone);

        let err = engine
            .attempt_move(&mut state, StoryId::new(4), Stage::DevelopedInProgress, PlayMode::Normal)
            .unwrap_err();
        assert!(matches!(err, KanbanError::WipLimitReached { group: StageGroup::Development, .. }));
    }

    #[test]
    fn test_capacity_checked_before_table() {
        let (mut state, engine) = board();
        place(&mut state, 1, Stage::Testing);
        place(&mut state, 2, Stage::Testing);
        place(&mut state, 3, Stage::Testing);

        // Backlog -> testing is illegal, but the full column reports first
        let err = engine
            .attempt_move(&mut state, StoryId::new(4), Stage::Testing, PlayMode::Normal)
            .unwrap_err();
        assert!(matches!(err, KanbanError::WipLimitReached { .. }));
    }

    #[test]
    fn test_deploy_requires_finished_testing() {
        let (mut state, engine) = board();
        place(&mut state, 1, Stage::Testing);
        place(&mut state, 2, Stage::DevelopedDone);

        assert!(matches!(
            engine.attempt_move(&mut state, StoryId::new(1), Stage::Deployed, PlayMode::Normal),
            Err(KanbanError::PrerequisiteNotMet { .. })
        ));
        assert!(matches!(
            engine.attempt_move(&mut state, StoryId::new(2), Stage::Deployed, PlayMode::Normal),
            Err(KanbanError::IllegalTransition { .. })
        ));

        state.stories.require_mut(StoryId::new(1)).unwrap().effort.testing = 0;
        assert!(engine
            .attempt_move(&mut state, StoryId::new(1), Stage::Deployed, PlayMode::Normal)
            .is_ok());
    }

    #[test]
    fn test_sandbox_bypasses_rules() {
        let (mut state, engine) = board();
        for id in 1..=4 {
            engine
                .attempt_move(&mut state, StoryId::new(id), Stage::Testing, PlayMode::Sandbox)
                .unwrap();
        }
        assert_eq!(state.stories.count_in(Stage::Testing), 4);

        engine
            .attempt_move(&mut state, StoryId::new(5), Stage::Deployed, PlayMode::Sandbox)
            .unwrap();
        assert_eq!(state.stories.count_in(Stage::Deployed), 1);
    }

    #[test]
    fn test_hidden_never_a_target() {
        let (mut state, engine) = board();
        for mode in [PlayMode::Normal, PlayMode::Sandbox] {
            assert!(engine
                .attempt_move(&mut state, StoryId::new(1), Stage::Hidden, mode)
                .is_err());
        }
    }

    #[test]
    fn test_unknown_and_hidden_stories_not_found() {
        let (mut state, engine) = board();
        for id in [StoryId::new(6), StoryId::new(99)] {
            let err = engine
                .attempt_move(&mut state, id, Stage::Prioritized, PlayMode::Sandbox)
                .unwrap_err();
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_legal_targets() {
        let (mut state, engine) = board();
        let id = StoryId::new(1);

        assert_eq!(
            engine.legal_targets(&state.stories, id, PlayMode::Normal),
            vec![Stage::Prioritized]
        );
        assert_eq!(engine.legal_targets(&state.stories, id, PlayMode::Sandbox).len(), 7);

        place(&mut state, 1, Stage::Prioritized);
        assert!(engine.legal_targets(&state.stories, id, PlayMode::Normal).is_empty());
        assert!(engine.legal_targets(&state.stories, StoryId::new(50), PlayMode::Normal).is_empty());
    }
}
