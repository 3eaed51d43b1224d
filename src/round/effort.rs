//! Effort models: how much work a resource delivers in one round.
//!
//! Models are trait-based to allow customization:
//! - `UniformEffort`: uniform draw from an inclusive range (normal play)
//! - `FixedEffort`: constant output (deterministic scenarios)
//! - `ScriptedEffort`: replays a fixed sequence (deterministic scenarios)

use crate::core::config::EffortRange;
use crate::core::rng::GameRng;

/// Source of per-resource effort draws.
///
/// Called once per allocated resource per story per round, so every
/// resource-story pair gets an independent draw.
pub trait EffortModel: Send + Sync {
    /// Effort points delivered by one resource this round.
    fn deliver(&mut self, rng: &mut GameRng) -> u32;
}

/// Uniform draw from an inclusive range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformEffort {
    range: EffortRange,
}

impl UniformEffort {
    #[must_use]
    pub const fn new(range: EffortRange) -> Self {
        Self { range }
    }
}

impl EffortModel for UniformEffort {
    fn deliver(&mut self, rng: &mut GameRng) -> u32 {
        rng.gen_range_inclusive(self.range.min, self.range.max)
    }
}

/// Every resource delivers the same amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedEffort(pub u32);

impl EffortModel for FixedEffort {
    fn deliver(&mut self, _rng: &mut GameRng) -> u32 {
        self.0
    }
}

/// Replays a sequence of draws, repeating the last one when exhausted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedEffort {
    draws: Vec<u32>,
    next: usize,
}

impl ScriptedEffort {
    #[must_use]
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }
}

impl EffortModel for ScriptedEffort {
    fn deliver(&mut self, _rng: &mut GameRng) -> u32 {
        let Some(&last) = self.draws.last() else {
            return 0;
        };
        let value = self.draws.get(self.next).copied().unwrap_or(last);
        self.next += 1;
        value
    }
}
