//! Board rules: stage transitions, WIP limits, and resource allocation.
//!
//! - `TransitionEngine` validates and applies stage moves
//! - `allocation` attaches resources to stories and returns them to the pool
//!
//! Both operate on a `BoardState` passed in by the caller and take the
//! current `PlayMode` explicitly where it matters.

pub mod allocation;
pub mod transitions;

pub use allocation::{attempt_allocate, reclaim, return_to_pool, Allocation};
pub use transitions::{guard_for, Guard, TransitionEngine, MIN_DAYS_PRIORITIZED, TRANSITIONS};
