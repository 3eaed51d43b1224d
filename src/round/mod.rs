//! Round simulation: effort, phase completion, reclamation, profit.
//!
//! ## Key Types
//!
//! - `GameClock`: Current day, last day, accumulated profit
//! - `EffortModel`: Per-resource effort draws (`UniformEffort`, `FixedEffort`, `ScriptedEffort`)
//! - `RoundSimulator`: Plays one day against a `BoardState`
//! - `RoundReport`: Summary of a completed round

pub mod clock;
pub mod effort;
pub mod simulator;

pub use clock::GameClock;
pub use effort::{EffortModel, FixedEffort, ScriptedEffort, UniformEffort};
pub use simulator::{RoundReport, RoundSimulator};
