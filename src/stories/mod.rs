//! Story system: catalog, runtime records, and registry.
//!
//! ## Key Types
//!
//! - `StoryDefinition`: Static catalog entry (description, price, effort)
//! - `Story`: Runtime state (stage, remaining effort, allocation set)
//! - `Effort`: Effort points per phase
//! - `StoryRegistry`: Lookup, reveal, and backlog replenishment
//!
//! Stories start hidden and are revealed into the backlog in catalog order.
//! Once revealed a story never leaves the board.

pub mod catalog;
pub mod registry;
pub mod story;

pub use catalog::{StoryDefinition, CATALOG};
pub use registry::StoryRegistry;
pub use story::{Effort, Story};
