//! Round simulator: advances the board by one day.
//!
//! ## Normal mode
//!
//! For every revealed story, in registry order:
//! 1. A story waiting in `prioritized` gains a day.
//! 2. Each allocated resource draws its delivered effort. If its kind works
//!    the story's stage, the effort is subtracted (floored at 0); otherwise
//!    it is wasted.
//! 3. A story whose in-progress phase reached 0 advances one stage and is
//!    marked for reclamation.
//!
//! ## Sandbox mode
//!
//! Every in-progress story has its phase zeroed and advances unconditionally.
//!
//! ## Both modes
//!
//! Marked stories return their resources to the pool, every deployed story
//! pays its price, the day advances, and the backlog is replenished.

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::effort::{EffortModel, UniformEffort};
use crate::core::config::{BoardConfig, PlayMode};
use crate::core::error::{KanbanError, Result};
use crate::core::ids::StoryId;
use crate::core::stage::Stage;
use crate::core::state::BoardState;
use crate::events::BoardEvent;
use crate::rules::allocation;

/// What a completed round did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Day that was played.
    pub day: u32,
    /// Stories that finished a phase, with the stage they reached.
    pub completed: Vec<(StoryId, Stage)>,
    /// Resources returned to the pool.
    pub reclaimed: usize,
    /// Earnings from deployed stories this round.
    pub profit: u64,
    /// Stories revealed into the backlog.
    pub revealed: Vec<StoryId>,
}

/// Advances the board one day at a time.
#[derive(Clone, Debug)]
pub struct RoundSimulator<E: EffortModel = UniformEffort> {
    effort: E,
    backlog_target: usize,
}

impl RoundSimulator<UniformEffort> {
    /// Create a simulator using the configured effort range.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(UniformEffort::new(config.effort_range), config.backlog_target)
    }
}

impl<E: EffortModel> RoundSimulator<E> {
    /// Create a simulator with a custom effort model.
    #[must_use]
    pub fn new(effort: E, backlog_target: usize) -> Self {
        Self {
            effort,
            backlog_target,
        }
    }

    /// Play one round.
    ///
    /// Fails with `GameOver` and leaves the board untouched once the last
    /// day has been reached.
    pub fn complete_round(&mut self, state: &mut BoardState, mode: PlayMode) -> Result<RoundReport> {
        if state.clock.is_over() {
            return Err(KanbanError::GameOver {
                day: state.clock.current_day(),
            });
        }

        let day = state.clock.current_day();
        let completed = match mode {
            PlayMode::Normal => self.apply_effort(state),
            PlayMode::Sandbox => auto_complete(state),
        };

        let mut reclaimed = 0;
        for &(story, _) in &completed {
            reclaimed += allocation::reclaim(state, story)?;
        }

        let profit: u64 = state.stories.deployed_stories().map(|s| s.price).sum();
        let total = state.clock.accrue(profit);
        state.events.record(BoardEvent::ProfitAccrued {
            amount: profit,
            total,
        });

        let next_day = state.clock.advance();
        state.events.record(BoardEvent::RoundCompleted { day: next_day });

        let revealed = state.stories.replenish_backlog(self.backlog_target);
        for &story in &revealed {
            state.events.record(BoardEvent::StoryRevealed { story });
        }

        info!(
            day,
            ?mode,
            completed = completed.len(),
            reclaimed,
            profit,
            total,
            "round completed"
        );

        Ok(RoundReport {
            day,
            completed: completed.into_vec(),
            reclaimed,
            profit,
            revealed,
        })
    }

    fn apply_effort(&mut self, state: &mut BoardState) -> SmallVec<[(StoryId, Stage); 4]> {
        let BoardState {
            stories,
            pool,
            rng,
            events,
            ..
        } = state;
        let mut completed = SmallVec::new();

        for story in stories.active_mut() {
            if story.stage == Stage::Prioritized {
                story.days_in_stage += 1;
            }

            for &resource_id in &story.allocated {
                let Some(resource) = pool.get(resource_id) else {
                    continue;
                };
                let delivered = self.effort.deliver(rng);
                let applied = if resource.kind.can_work(story.stage) {
                    story.effort.reduce(resource.kind, delivered)
                } else {
                    0
                };

                trace!(
                    story = %story.id,
                    %resource,
                    delivered,
                    applied,
                    remaining = ?story.current_effort(),
                    "effort applied"
                );
                events.record(BoardEvent::EffortApplied {
                    story: story.id,
                    resource: resource_id,
                    delivered,
                    applied,
                });
            }

            if story.phase_complete() {
                if let Some(to) = story.stage.completion() {
                    let from = std::mem::replace(&mut story.stage, to);
                    debug!(story = %story.id, %from, %to, "phase completed");
                    events.record(BoardEvent::PhaseCompleted {
                        story: story.id,
                        from,
                        to,
                    });
                    completed.push((story.id, to));
                }
            }
        }

        completed
    }
}

fn auto_complete(state: &mut BoardState) -> SmallVec<[(StoryId, Stage); 4]> {
    let BoardState {
        stories, events, ..
    } = state;
    let mut completed = SmallVec::new();

    for story in stories.active_mut() {
        let (Some(kind), Some(to)) = (story.stage.work_kind(), story.stage.completion()) else {
            continue;
        };
        story.effort.clear(kind);
        let from = std::mem::replace(&mut story.stage, to);

        debug!(story = %story.id, %from, %to, "phase auto-completed");
        events.record(BoardEvent::PhaseCompleted {
            story: story.id,
            from,
            to,
        });
        completed.push((story.id, to));
    }

    completed
}
