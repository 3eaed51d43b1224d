//! Story registry and backlog replenishment.
//!
//! The `StoryRegistry` owns every story for the whole game, hidden or
//! revealed, in catalog order. Lookups only see revealed stories: a hidden
//! story does not exist as far as board commands are concerned.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::catalog::{StoryDefinition, CATALOG};
use super::story::Story;
use crate::core::error::{KanbanError, Result};
use crate::core::ids::{ResourceId, StoryId};
use crate::core::stage::{Stage, StageGroup};

/// Catalog of all stories with their runtime state.
///
/// ## Example
///
/// ```
/// use kanban_sim::stories::StoryRegistry;
/// use kanban_sim::core::{Stage, StoryId};
///
/// let mut registry = StoryRegistry::standard();
/// registry.reveal_initial(5);
///
/// assert_eq!(registry.count_in(Stage::Backlog), 5);
/// assert!(registry.find_by_id(StoryId::new(1)).is_some());
/// assert!(registry.find_by_id(StoryId::new(6)).is_none()); // still hidden
/// ```
#[derive(Clone, Debug, Default)]
pub struct StoryRegistry {
    /// All stories in catalog order.
    stories: Vec<Story>,

    /// story_id -> index into `stories`
    index: FxHashMap<StoryId, usize>,
}

impl StoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard 20-story catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in &CATALOG {
            let registered = registry.register(def.instantiate());
            debug_assert!(registered.is_ok(), "duplicate catalog id {}", def.id);
        }
        registry
    }

    /// Create a registry from custom definitions.
    pub fn from_definitions<'a>(
        defs: impl IntoIterator<Item = &'a StoryDefinition>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def.instantiate())?;
        }
        Ok(registry)
    }

    /// Append a story to the catalog.
    ///
    /// Fails if a story with the same id is already registered.
    pub fn register(&mut self, story: Story) -> Result<()> {
        if self.index.contains_key(&story.id) {
            return Err(KanbanError::InvalidConfig(format!(
                "story {} registered twice",
                story.id
            )));
        }
        self.index.insert(story.id, self.stories.len());
        self.stories.push(story);
        Ok(())
    }

    /// Reveal the first `n` catalog stories into the backlog.
    ///
    /// Returns the ids revealed.
    pub fn reveal_initial(&mut self, n: usize) -> Vec<StoryId> {
        self.reveal_hidden(n)
    }

    /// Reveal hidden stories until the backlog holds `target` stories or
    /// the hidden pool runs out.
    ///
    /// Returns the ids revealed, in catalog order.
    pub fn replenish_backlog(&mut self, target: usize) -> Vec<StoryId> {
        let current = self.count_in(Stage::Backlog);
        let needed = target.saturating_sub(current);
        let revealed = self.reveal_hidden(needed);

        debug!(
            backlog = current,
            needed,
            revealed = revealed.len(),
            "replenished backlog"
        );
        revealed
    }

    fn reveal_hidden(&mut self, n: usize) -> Vec<StoryId> {
        self.stories
            .iter_mut()
            .filter(|s| s.stage == Stage::Hidden)
            .take(n)
            .map(|s| {
                s.stage = Stage::Backlog;
                s.id
            })
            .collect()
    }

    /// Get a revealed story by id.
    #[must_use]
    pub fn find_by_id(&self, id: StoryId) -> Option<&Story> {
        self.index
            .get(&id)
            .map(|&i| &self.stories[i])
            .filter(|s| s.is_revealed())
    }

    /// Get a revealed story by id, mutably.
    pub fn find_by_id_mut(&mut self, id: StoryId) -> Option<&mut Story> {
        let i = *self.index.get(&id)?;
        let story = &mut self.stories[i];
        story.is_revealed().then_some(story)
    }

    /// Get a revealed story or fail with `StoryNotFound`.
    pub fn require(&self, id: StoryId) -> Result<&Story> {
        self.find_by_id(id).ok_or(KanbanError::StoryNotFound(id))
    }

    /// Get a revealed story mutably or fail with `StoryNotFound`.
    pub fn require_mut(&mut self, id: StoryId) -> Result<&mut Story> {
        self.find_by_id_mut(id).ok_or(KanbanError::StoryNotFound(id))
    }

    /// Revealed stories, in reveal order.
    pub fn active(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter().filter(|s| s.is_revealed())
    }

    /// Revealed stories, mutably, in reveal order.
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Story> {
        self.stories.iter_mut().filter(|s| s.is_revealed())
    }

    /// Stories currently deployed.
    pub fn deployed_stories(&self) -> impl Iterator<Item = &Story> {
        self.in_stage(Stage::Deployed)
    }

    /// Stories in a stage.
    pub fn in_stage(&self, stage: Stage) -> impl Iterator<Item = &Story> {
        self.stories.iter().filter(move |s| s.stage == stage)
    }

    /// Number of stories in a stage.
    #[must_use]
    pub fn count_in(&self, stage: Stage) -> usize {
        self.in_stage(stage).count()
    }

    /// Number of stories counting toward a WIP group.
    #[must_use]
    pub fn count_in_group(&self, group: StageGroup) -> usize {
        self.stories.iter().filter(|s| group.contains(s.stage)).count()
    }

    /// Story whose allocation set holds `resource`.
    #[must_use]
    pub fn holder_of(&self, resource: ResourceId) -> Option<StoryId> {
        self.active().find(|s| s.holds(resource)).map(|s| s.id)
    }

    /// Number of stories still hidden.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.count_in(Stage::Hidden)
    }

    /// Total number of stories, hidden or revealed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}
