//! Read-only board views for presentation layers.
//!
//! A `BoardSnapshot` carries everything needed to redraw the board: each
//! story's card, the waiting resources, WIP counters, and the clock.

use serde::Serialize;

use crate::core::config::{PlayMode, WipLimits};
use crate::core::ids::StoryId;
use crate::core::stage::{Stage, StageGroup};
use crate::core::state::BoardState;
use crate::resources::Resource;
use crate::stories::{Effort, Story, StoryRegistry};

/// Occupancy of one WIP-limited group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WipStatus {
    pub group: StageGroup,
    pub count: usize,
    pub limit: usize,
}

impl WipStatus {
    /// Check if the group holds more than its limit (sandbox only).
    #[must_use]
    pub fn is_over_limit(&self) -> bool {
        self.count > self.limit
    }

    /// Check if the group has no room left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count >= self.limit
    }
}

/// WIP status for every limited group, in pipeline order.
#[must_use]
pub fn wip_counts(stories: &StoryRegistry, limits: &WipLimits) -> Vec<WipStatus> {
    StageGroup::ALL
        .into_iter()
        .map(|group| WipStatus {
            group,
            count: stories.count_in_group(group),
            limit: limits.limit(group),
        })
        .collect()
}

/// Number of cards in one board column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub stage: Stage,
    pub count: usize,
}

/// One story card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoryView {
    pub id: StoryId,
    pub description: String,
    pub price: u64,
    pub stage: Stage,
    pub effort: Effort,
    pub original_effort: Effort,
    pub days_in_stage: u32,
    pub allocated: Vec<Resource>,
}

impl StoryView {
    fn new(story: &Story, state: &BoardState) -> Self {
        Self {
            id: story.id,
            description: story.description.clone(),
            price: story.price,
            stage: story.stage,
            effort: story.effort,
            original_effort: story.original_effort,
            days_in_stage: story.days_in_stage,
            allocated: story
                .allocated
                .iter()
                .filter_map(|&r| state.pool.get(r).copied())
                .collect(),
        }
    }
}

/// Full observable board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub day: u32,
    pub max_days: u32,
    pub total_profit: u64,
    pub game_over: bool,
    pub mode: PlayMode,
    pub wip: Vec<WipStatus>,
    pub columns: Vec<ColumnCount>,
    pub stories: Vec<StoryView>,
    pub available_resources: Vec<Resource>,
}

impl BoardSnapshot {
    /// Capture the board.
    #[must_use]
    pub fn capture(state: &BoardState, limits: &WipLimits, mode: PlayMode) -> Self {
        Self {
            day: state.clock.current_day(),
            max_days: state.clock.max_days(),
            total_profit: state.clock.total_profit(),
            game_over: state.clock.is_over(),
            mode,
            wip: wip_counts(&state.stories, limits),
            columns: Stage::BOARD
                .into_iter()
                .map(|stage| ColumnCount {
                    stage,
                    count: state.stories.count_in(stage),
                })
                .collect(),
            stories: state
                .stories
                .active()
                .map(|s| StoryView::new(s, state))
                .collect(),
            available_resources: state.pool.available().copied().collect(),
        }
    }

    /// Cards in one column, in reveal order.
    pub fn column(&self, stage: Stage) -> impl Iterator<Item = &StoryView> {
        self.stories.iter().filter(move |s| s.stage == stage)
    }

    /// WIP status for a group.
    #[must_use]
    pub fn wip_for(&self, group: StageGroup) -> Option<&WipStatus> {
        self.wip.iter().find(|w| w.group == group)
    }
}
