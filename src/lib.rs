//! # kanban-sim
//!
//! A turn-based Kanban board simulation: user stories flow through a
//! delivery pipeline, limited labor is assigned each day, and deployed
//! stories earn recurring profit.
//!
//! ## Design Principles
//!
//! 1. **Explicit Mode**: Every engine entry point takes the `PlayMode`.
//!    Sandbox play relaxes movement rules and auto-completes phases.
//!
//! 2. **Single Owner**: A resource is always in exactly one place, either
//!    the available pool or one story's allocation set.
//!
//! 3. **Reject Without Side Effects**: Commands return `Result`; a rejected
//!    command leaves the board untouched.
//!
//! ## Architecture
//!
//! - **Board State Context**: `BoardState` bundles stories, pool, clock,
//!   RNG and event log, and is passed explicitly to the engines.
//!
//! - **Observer Events**: Presentation layers read `BoardEvent`s and
//!   `BoardSnapshot`s; the core never calls out.
//!
//! - **Deterministic Effort**: Effort draws come from a seeded ChaCha8 RNG
//!   through the `EffortModel` trait.
//!
//! ## Modules
//!
//! - `core`: IDs, stages, configuration, errors, RNG, board state
//! - `stories`: Story cards, the catalog, and the registry
//! - `resources`: Resources and the available pool
//! - `rules`: Stage transitions, WIP limits, and allocation
//! - `round`: Clock, effort models, and the round simulator
//! - `events`: Board event stream
//! - `game`: `KanbanGame` facade and snapshots

pub mod core;
pub mod events;
pub mod game;
pub mod resources;
pub mod round;
pub mod rules;
pub mod stories;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BoardState, EffortRange, GameRng, KanbanError, PlayMode,
    ResourceId, ResourceKind, Result, Stage, StageGroup, StoryId, WipLimits,
};

pub use crate::events::{BoardEvent, EventLog, Holder};

pub use crate::game::{BoardSnapshot, ColumnCount, KanbanGame, KanbanGameBuilder, StoryView, WipStatus};

pub use crate::resources::{Resource, ResourcePool};

pub use crate::round::{
    EffortModel, FixedEffort, GameClock, RoundReport, RoundSimulator, ScriptedEffort,
    UniformEffort,
};

pub use crate::rules::{Allocation, Guard, TransitionEngine};

pub use crate::stories::{Effort, Story, StoryDefinition, StoryRegistry, CATALOG};
