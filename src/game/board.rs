//! The playable board: one game session behind a command/query surface.

use tracing::info;

use super::snapshot::{wip_counts, BoardSnapshot, WipStatus};
use crate::core::config::{BoardConfig, PlayMode};
use crate::core::error::Result;
use crate::core::ids::{ResourceId, StoryId};
use crate::core::stage::Stage;
use crate::core::state::BoardState;
use crate::events::BoardEvent;
use crate::resources::Resource;
use crate::round::{EffortModel, RoundReport, RoundSimulator, UniformEffort};
use crate::rules::{self, Allocation, TransitionEngine};
use crate::stories::{Story, StoryDefinition, StoryRegistry};

/// A Kanban board session.
///
/// Owns the board state and the play mode; every command goes through the
/// transition engine or the round simulator with the current mode.
#[derive(Clone, Debug)]
pub struct KanbanGame<E: EffortModel = UniformEffort> {
    config: BoardConfig,
    state: BoardState,
    engine: TransitionEngine,
    simulator: RoundSimulator<E>,
    mode: PlayMode,
}

/// Builder for creating a `KanbanGame`.
#[derive(Clone, Debug, Default)]
pub struct KanbanGameBuilder {
    config: BoardConfig,
    stories: Option<StoryRegistry>,
}

impl KanbanGameBuilder {
    /// Start from the default configuration and the standard catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the effort RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the day the game ends on.
    #[must_use]
    pub fn max_days(mut self, max_days: u32) -> Self {
        self.config.max_days = max_days;
        self
    }

    /// Set the starting play mode.
    #[must_use]
    pub fn mode(mut self, mode: PlayMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    /// Use a custom story catalog instead of the standard one.
    #[must_use]
    pub fn stories(mut self, stories: StoryRegistry) -> Self {
        self.stories = Some(stories);
        self
    }

    /// Build from story definitions.
    pub fn definitions<'a>(
        mut self,
        definitions: impl IntoIterator<Item = &'a StoryDefinition>,
    ) -> Result<Self> {
        self.stories = Some(StoryRegistry::from_definitions(definitions)?);
        Ok(self)
    }

    /// Build the game with uniform effort draws from the configured range.
    pub fn build(self) -> Result<KanbanGame> {
        let simulator = RoundSimulator::from_config(&self.config);
        self.build_with(simulator)
    }

    /// Build the game with a custom effort model.
    pub fn build_with_effort<E: EffortModel>(self, effort: E) -> Result<KanbanGame<E>> {
        let simulator = RoundSimulator::new(effort, self.config.backlog_target);
        self.build_with(simulator)
    }

    fn build_with<E: EffortModel>(self, simulator: RoundSimulator<E>) -> Result<KanbanGame<E>> {
        let stories = self.stories.unwrap_or_else(StoryRegistry::standard);
        let state = BoardState::with_stories(&self.config, stories)?;
        info!(
            seed = self.config.seed,
            max_days = self.config.max_days,
            mode = ?self.config.initial_mode,
            "game started"
        );
        Ok(KanbanGame {
            engine: TransitionEngine::new(self.config.wip_limits),
            mode: self.config.initial_mode,
            config: self.config,
            state,
            simulator,
        })
    }
}

impl KanbanGame {
    /// Start a game with the standard catalog.
    pub fn new(config: BoardConfig) -> Result<Self> {
        KanbanGameBuilder::new().config(config).build()
    }
}

impl<E: EffortModel> KanbanGame<E> {
    // Commands

    /// Move a story to another column. Returns the stage it left.
    pub fn attempt_move(&mut self, story: StoryId, target: Stage) -> Result<Stage> {
        self.engine
            .attempt_move(&mut self.state, story, target, self.mode)
    }

    /// Attach a resource to a story, taking it from the pool or another story.
    pub fn attempt_allocate(&mut self, resource: ResourceId, story: StoryId) -> Result<Allocation> {
        rules::attempt_allocate(&mut self.state, resource, story)
    }

    /// Send a resource back to the pool. `Ok(false)` if it was already there.
    pub fn return_resource_to_pool(&mut self, resource: ResourceId) -> Result<bool> {
        rules::return_to_pool(&mut self.state, resource)
    }

    /// Play one day.
    pub fn complete_round(&mut self) -> Result<RoundReport> {
        self.simulator.complete_round(&mut self.state, self.mode)
    }

    /// Switch between normal and sandbox play. Returns the new mode.
    pub fn toggle_sandbox_mode(&mut self) -> PlayMode {
        self.mode = self.mode.toggled();
        info!(mode = ?self.mode, "play mode changed");
        self.state
            .events
            .record(BoardEvent::ModeChanged { mode: self.mode });
        self.mode
    }

    // Queries

    /// A revealed story. Hidden stories are not visible.
    pub fn get_story(&self, id: StoryId) -> Option<&Story> {
        self.state.stories.find_by_id(id)
    }

    /// Every revealed story, in reveal order.
    pub fn list_active_stories(&self) -> impl Iterator<Item = &Story> {
        self.state.stories.active()
    }

    /// Stories in one column.
    pub fn stories_in(&self, stage: Stage) -> impl Iterator<Item = &Story> {
        self.state.stories.in_stage(stage)
    }

    /// Resources waiting in the pool.
    pub fn list_available_resources(&self) -> impl Iterator<Item = &Resource> {
        self.state.pool.available()
    }

    pub fn day(&self) -> u32 {
        self.state.clock.current_day()
    }

    pub fn max_days(&self) -> u32 {
        self.state.clock.max_days()
    }

    pub fn total_profit(&self) -> u64 {
        self.state.clock.total_profit()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.clock.is_over()
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Columns the story may move to under the current mode.
    pub fn legal_targets(&self, story: StoryId) -> Vec<Stage> {
        self.engine
            .legal_targets(&self.state.stories, story, self.mode)
    }

    /// Occupancy of every WIP-limited group.
    pub fn wip_counts(&self) -> Vec<WipStatus> {
        wip_counts(&self.state.stories, self.engine.limits())
    }

    /// Events recorded after `cursor`. Pass `event_cursor()` to resume.
    pub fn events_since(&self, cursor: usize) -> impl Iterator<Item = &BoardEvent> {
        self.state.events.events_since(cursor)
    }

    /// Position after the latest event.
    pub fn event_cursor(&self) -> usize {
        self.state.events.len()
    }

    /// Full board view for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.state, self.engine.limits(), self.mode)
    }

    /// Raw board state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::KanbanError;
    use crate::round::FixedEffort;

    const S1: StoryId = StoryId::new(1);

    #[test]
    fn test_new_game() {
        let game = KanbanGame::new(BoardConfig::default()).unwrap();

        assert_eq!(game.day(), 1);
        assert_eq!(game.max_days(), 35);
        assert_eq!(game.total_profit(), 0);
        assert_eq!(game.mode(), PlayMode::Normal);
        assert!(!game.is_game_over());
        assert_eq!(game.list_active_stories().count(), 5);
        assert_eq!(game.list_available_resources().count(), 9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig::default().with_max_days(1);
        assert!(matches!(
            KanbanGame::new(config),
            Err(KanbanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder_settings() {
        let mut stories = StoryRegistry::new();
        stories
            .register(StoryDefinition::new(1, "Checkout", 90, [2, 3, 4]).instantiate())
            .unwrap();

        let game = KanbanGameBuilder::new()
            .seed(7)
            .max_days(10)
            .stories(stories)
            .build()
            .unwrap();

        assert_eq!(game.config().seed, 7);
        assert_eq!(game.max_days(), 10);
        assert_eq!(game.list_active_stories().count(), 1);
        assert_eq!(game.get_story(S1).unwrap().price, 90);
    }

    #[test]
    fn test_seed_drives_effort_draws() {
        let remaining = |seed| {
            let mut game = KanbanGameBuilder::new().seed(seed).build().unwrap();
            game.toggle_sandbox_mode();
            game.attempt_move(StoryId::new(4), Stage::DevelopedInProgress).unwrap();
            game.toggle_sandbox_mode();
            game.attempt_allocate(ResourceId::new(4), StoryId::new(4)).unwrap();
            (0..3)
                .map(|_| {
                    game.complete_round().unwrap();
                    game.get_story(StoryId::new(4)).unwrap().effort.development
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(remaining(7), remaining(7));
    }

    #[test]
    fn test_hidden_story_not_visible() {
        let game = KanbanGame::new(BoardConfig::default()).unwrap();
        assert!(game.get_story(StoryId::new(6)).is_none());
        assert!(game.legal_targets(StoryId::new(6)).is_empty());
    }

    #[test]
    fn test_toggle_mode_records_event() {
        let mut game = KanbanGame::new(BoardConfig::default()).unwrap();
        let cursor = game.event_cursor();

        assert_eq!(game.toggle_sandbox_mode(), PlayMode::Sandbox);
        assert_eq!(game.toggle_sandbox_mode(), PlayMode::Normal);

        let events: Vec<_> = game.events_since(cursor).cloned().collect();
        assert_eq!(
            events,
            vec![
                BoardEvent::ModeChanged {
                    mode: PlayMode::Sandbox
                },
                BoardEvent::ModeChanged {
                    mode: PlayMode::Normal
                },
            ]
        );
    }

    #[test]
    fn test_initial_mode_from_config() {
        let game = KanbanGameBuilder::new()
            .mode(PlayMode::Sandbox)
            .build()
            .unwrap();
        assert_eq!(game.mode(), PlayMode::Sandbox);
        // Sandbox skips the prioritized gate
        assert!(game.legal_targets(S1).contains(&Stage::AnalyzedInProgress));
    }

    #[test]
    fn test_mode_applies_to_moves() {
        let mut game = KanbanGame::new(BoardConfig::default()).unwrap();
        assert!(game.attempt_move(S1, Stage::Testing).is_err());

        game.toggle_sandbox_mode();
        assert_eq!(game.attempt_move(S1, Stage::Testing), Ok(Stage::Backlog));
    }

    #[test]
    fn test_facade_play_through() {
        let mut game = KanbanGameBuilder::new()
            .build_with_effort(FixedEffort(25))
            .unwrap();

        game.attempt_move(S1, Stage::Prioritized).unwrap();
        game.complete_round().unwrap();
        game.attempt_move(S1, Stage::AnalyzedInProgress).unwrap();
        game.attempt_allocate(ResourceId::new(1), S1).unwrap();
        game.complete_round().unwrap();
        assert_eq!(game.get_story(S1).unwrap().stage, Stage::AnalyzedDone);

        game.attempt_move(S1, Stage::DevelopedInProgress).unwrap();
        game.attempt_allocate(ResourceId::new(4), S1).unwrap();
        game.complete_round().unwrap();
        game.attempt_move(S1, Stage::Testing).unwrap();
        game.attempt_allocate(ResourceId::new(7), S1).unwrap();
        let report = game.complete_round().unwrap();

        assert_eq!(report.completed, vec![(S1, Stage::Deployed)]);
        assert_eq!(report.profit, 150);
        assert_eq!(game.total_profit(), 150);
        assert_eq!(game.list_available_resources().count(), 9);
    }

    #[test]
    fn test_return_resource_via_facade() {
        let mut game = KanbanGame::new(BoardConfig::default()).unwrap();
        game.toggle_sandbox_mode();
        game.attempt_move(S1, Stage::Testing).unwrap();
        game.attempt_allocate(ResourceId::new(7), S1).unwrap();

        assert_eq!(game.return_resource_to_pool(ResourceId::new(7)), Ok(true));
        assert_eq!(game.return_resource_to_pool(ResourceId::new(7)), Ok(false));
        assert!(game.get_story(S1).unwrap().allocated.is_empty());
    }

    #[test]
    fn test_wip_counts_follow_moves() {
        let mut game = KanbanGame::new(BoardConfig::default()).unwrap();
        game.attempt_move(S1, Stage::Prioritized).unwrap();

        let wip = game.wip_counts();
        assert_eq!(wip[0].count, 1);
        assert_eq!(game.snapshot().wip, wip);
    }
}
