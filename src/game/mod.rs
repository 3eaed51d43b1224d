//! Game session facade.
//!
//! `KanbanGame` bundles the board state, the transition engine, the round
//! simulator and the play mode. `BoardSnapshot` is its serializable view.

pub mod board;
pub mod snapshot;

pub use board::{KanbanGame, KanbanGameBuilder};
pub use snapshot::{wip_counts, BoardSnapshot, ColumnCount, StoryView, WipStatus};
