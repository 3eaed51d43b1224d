//! Resource pool for typed labor units.
//!
//! ## Key Types
//!
//! - `Resource`: A labor unit with a `ResourceKind`
//! - `ResourcePool`: Ownership of all resources and the available set
//!
//! A resource is always in exactly one place: the available set or the
//! allocation set of a single story.

pub mod pool;

pub use pool::{Resource, ResourcePool};

// Re-export resource types from core for convenience
pub use crate::core::ids::ResourceId;
pub use crate::core::stage::ResourceKind;
