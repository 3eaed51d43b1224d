//! Game clock and profit accumulator.

use serde::{Deserialize, Serialize};

/// Day counter and running profit.
///
/// The game is over once `current_day` reaches `max_days`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    current_day: u32,
    max_days: u32,
    total_profit: u64,
}

impl GameClock {
    /// Create a clock starting on `first_day`.
    #[must_use]
    pub const fn new(first_day: u32, max_days: u32) -> Self {
        Self {
            current_day: first_day,
            max_days,
            total_profit: 0,
        }
    }

    #[must_use]
    pub const fn current_day(&self) -> u32 {
        self.current_day
    }

    #[must_use]
    pub const fn max_days(&self) -> u32 {
        self.max_days
    }

    #[must_use]
    pub const fn total_profit(&self) -> u64 {
        self.total_profit
    }

    /// Check if no more rounds may be played.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.current_day >= self.max_days
    }

    /// Add round earnings. Returns the new total.
    pub fn accrue(&mut self, amount: u64) -> u64 {
        self.total_profit = self.total_profit.saturating_add(amount);
        self.total_profit
    }

    /// Move to the next day. Returns the new day.
    pub fn advance(&mut self) -> u32 {
        self.current_day += 1;
        self.current_day
    }
}
