//! Board state: everything a round or command mutates.
//!
//! ## BoardState
//!
//! - Story registry (catalog, stages, effort, allocation sets)
//! - Resource pool (ownership and the available set)
//! - Game clock (day, profit)
//! - Effort RNG
//! - Event log
//!
//! The engines (`TransitionEngine`, `RoundSimulator`) hold no board data;
//! they operate on a `&mut BoardState` passed in by the caller.

use tracing::debug;

use super::config::BoardConfig;
use super::error::Result;
use super::ids::ResourceId;
use super::rng::GameRng;
use crate::events::{BoardEvent, EventLog, Holder};
use crate::resources::ResourcePool;
use crate::round::GameClock;
use crate::stories::StoryRegistry;

/// Complete mutable board state.
#[derive(Clone, Debug)]
pub struct BoardState {
    pub stories: StoryRegistry,
    pub pool: ResourcePool,
    pub clock: GameClock,
    pub rng: GameRng,
    pub events: EventLog,
}

impl BoardState {
    /// Set up a new game with the standard catalog.
    pub fn new(config: &BoardConfig) -> Result<Self> {
        Self::with_stories(config, StoryRegistry::standard())
    }

    /// Set up a new game from a custom story registry.
    ///
    /// Reveals `config.initial_backlog` stories and fills the pool.
    pub fn with_stories(config: &BoardConfig, mut stories: StoryRegistry) -> Result<Self> {
        config.validate()?;

        let mut events = EventLog::new();
        for story in stories.reveal_initial(config.initial_backlog) {
            events.record(BoardEvent::StoryRevealed { story });
        }

        let pool = ResourcePool::with_kinds(config.resources_per_kind);
        debug!(
            stories = stories.len(),
            revealed = events.len(),
            resources = pool.len(),
            "board initialized"
        );

        Ok(Self {
            stories,
            pool,
            clock: GameClock::new(config.first_day, config.max_days),
            rng: GameRng::new(config.seed).for_context("effort"),
            events,
        })
    }

    /// Where a resource currently is.
    ///
    /// `None` for unknown ids.
    #[must_use]
    pub fn holder_of(&self, resource: ResourceId) -> Option<Holder> {
        if self.pool.is_available(resource) {
            return Some(Holder::Pool);
        }
        self.stories.holder_of(resource).map(Holder::Story)
    }

    /// Number of containers holding `resource`.
    ///
    /// Exactly 1 for every known resource while the board is consistent.
    #[must_use]
    pub fn holder_count(&self, resource: ResourceId) -> usize {
        let in_pool = self
            .pool
            .available_ids()
            .iter()
            .filter(|&&r| r == resource)
            .count();
        let in_stories: usize = self
            .stories
            .active()
            .map(|s| s.allocated.iter().filter(|&&r| r == resource).count())
            .sum();
        in_pool + in_stories
    }
}
