//! Identifier types for board objects.
//!
//! Stories and resources carry stable numeric identifiers. Presentation
//! layers map these ids to their own visual handles; the core never holds
//! rendering state.
//!
//! ```
//! use kanban_sim::core::{ResourceId, StoryId};
//!
//! let story = StoryId::new(3);
//! assert_eq!(story.raw(), 3);
//! assert_eq!(format!("{}", story), "Story(3)");
//!
//! let resource = ResourceId::new(7);
//! assert_eq!(format!("{}", resource), "Resource(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique, stable identifier of a story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoryId(pub u32);

impl StoryId {
    /// Create a new story ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Story({})", self.0)
    }
}

/// Unique identifier of a labor resource.
///
/// Resource ids are allocated sequentially at pool creation and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Create a new resource ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({})", self.0)
    }
}
