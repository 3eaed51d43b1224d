//! Board configuration.
//!
//! Games configure the board at startup with a `BoardConfig`:
//! - `WipLimits`: capacity of each limited stage group
//! - `EffortRange`: labor delivered per resource per round
//! - clock length, backlog policy, pool size, seed
//!
//! Defaults reproduce the standard 35-day game.

use serde::{Deserialize, Serialize};

use super::error::{KanbanError, Result};
use super::stage::StageGroup;

/// Rule set the engine applies to commands.
///
/// Threaded explicitly through every engine entry point rather than held
/// as global state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    /// Transition table, WIP limits, and the effort model all apply.
    #[default]
    Normal,
    /// Scenario setup: moves bypass every rule and rounds auto-complete
    /// in-progress work.
    Sandbox,
}

impl PlayMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            PlayMode::Normal => PlayMode::Sandbox,
            PlayMode::Sandbox => PlayMode::Normal,
        }
    }

    /// Check if rules are bypassed.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, PlayMode::Sandbox)
    }
}

/// WIP limit per stage group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WipLimits {
    pub prioritized: usize,
    /// Combined limit for analyzed-in-progress and analyzed-done.
    pub analysis: usize,
    /// Combined limit for developed-in-progress and developed-done.
    pub development: usize,
    pub testing: usize,
}

impl Default for WipLimits {
    fn default() -> Self {
        Self {
            prioritized: 3,
            analysis: 4,
            development: 3,
            testing: 3,
        }
    }
}

impl WipLimits {
    /// Limit for a stage group.
    #[must_use]
    pub fn limit(&self, group: StageGroup) -> usize {
        match group {
            StageGroup::Prioritized => self.prioritized,
            StageGroup::Analysis => self.analysis,
            StageGroup::Development => self.development,
            StageGroup::Testing => self.testing,
        }
    }
}

/// Inclusive range of effort one resource delivers in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortRange {
    pub min: u32,
    pub max: u32,
}

impl Default for EffortRange {
    fn default() -> Self {
        Self { min: 4, max: 8 }
    }
}

impl EffortRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Complete board configuration.
///
/// ```
/// use kanban_sim::core::BoardConfig;
///
/// let config = BoardConfig::default().with_max_days(10).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.backlog_target, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Day the game starts on.
    pub first_day: u32,

    /// The game is over once the current day reaches this value.
    pub max_days: u32,

    /// Catalog stories revealed into the backlog at game start.
    pub initial_backlog: usize,

    /// Backlog size restored at the end of every round.
    pub backlog_target: usize,

    /// Resources created per kind (analyst, developer, tester).
    pub resources_per_kind: usize,

    /// WIP limits per stage group.
    pub wip_limits: WipLimits,

    /// Effort one resource delivers per round.
    pub effort_range: EffortRange,

    /// Seed for effort draws.
    pub seed: u64,

    /// Mode the game starts in.
    pub initial_mode: PlayMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            first_day: 1,
            max_days: 35,
            initial_backlog: 5,
            backlog_target: 5,
            resources_per_kind: 3,
            wip_limits: WipLimits::default(),
            effort_range: EffortRange::default(),
            seed: 42,
            initial_mode: PlayMode::Normal,
        }
    }
}

impl BoardConfig {
    /// Set the game length.
    #[must_use]
    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of resources per kind.
    #[must_use]
    pub fn with_resources_per_kind(mut self, count: usize) -> Self {
        self.resources_per_kind = count;
        self
    }

    /// Set WIP limits.
    #[must_use]
    pub fn with_wip_limits(mut self, limits: WipLimits) -> Self {
        self.wip_limits = limits;
        self
    }

    /// Set the effort range.
    #[must_use]
    pub fn with_effort_range(mut self, range: EffortRange) -> Self {
        self.effort_range = range;
        self
    }

    /// Set the starting mode.
    #[must_use]
    pub fn with_initial_mode(mut self, mode: PlayMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.max_days <= self.first_day {
            return Err(KanbanError::InvalidConfig(format!(
                "max_days ({}) must exceed first_day ({})",
                self.max_days, self.first_day
            )));
        }
        if self.effort_range.min > self.effort_range.max {
            return Err(KanbanError::InvalidConfig(format!(
                "effort range {}..={} is inverted",
                self.effort_range.min, self.effort_range.max
            )));
        }
        if let Some(group) = StageGroup::ALL
            .into_iter()
            .find(|&g| self.wip_limits.limit(g) == 0)
        {
            return Err(KanbanError::InvalidConfig(format!(
                "WIP limit for {group} must be positive"
            )));
        }
        Ok(())
    }
}
