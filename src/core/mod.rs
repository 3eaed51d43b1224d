//! Core board types: ids, stages, configuration, errors, RNG, state.
//!
//! This module contains the building blocks shared by the story registry,
//! resource pool, and engines.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod stage;
pub mod state;

pub use config::{BoardConfig, EffortRange, PlayMode, WipLimits};
pub use error::{KanbanError, Result};
pub use ids::{ResourceId, StoryId};
pub use rng::GameRng;
pub use stage::{ResourceKind, Stage, StageGroup};
pub use state::BoardState;
