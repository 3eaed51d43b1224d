//! Resource pool for typed labor units.
//!
//! The `ResourcePool` owns every resource for the lifetime of the game and
//! tracks which ones are waiting to be assigned. A resource is in the
//! available set iff no story holds it; stories record their own
//! allocation sets (see `Story::allocated`).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{KanbanError, Result};
use crate::core::ids::ResourceId;
use crate::core::stage::ResourceKind;

/// A typed labor unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
}

impl Resource {
    /// Create a new resource.
    #[must_use]
    pub const fn new(id: ResourceId, kind: ResourceKind) -> Self {
        Self { id, kind }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.kind, self.id.raw())
    }
}

/// Owns all resources and the ordered set of available ones.
///
/// ## Usage
///
/// ```
/// use kanban_sim::resources::ResourcePool;
///
/// let mut pool = ResourcePool::with_kinds(3);
/// assert_eq!(pool.available_count(), 9);
///
/// let first = pool.available().next().unwrap().id;
/// let resource = pool.allocate(first).unwrap();
/// assert_eq!(pool.available_count(), 8);
///
/// // Releasing twice adds it back once
/// assert!(pool.release(resource.id));
/// assert!(!pool.release(resource.id));
/// assert_eq!(pool.available_count(), 9);
/// ```
#[derive(Clone, Debug)]
pub struct ResourcePool {
    /// Every resource ever created: id -> resource
    resources: FxHashMap<ResourceId, Resource>,

    /// Available resources in waiting-area order.
    available: Vec<ResourceId>,

    next_id: u32,
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourcePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: FxHashMap::default(),
            available: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a pool with `per_kind` resources of every kind.
    ///
    /// Ids are assigned kind by kind: analysts first, then developers,
    /// then testers.
    #[must_use]
    pub fn with_kinds(per_kind: usize) -> Self {
        let mut pool = Self::new();
        for kind in ResourceKind::ALL {
            for _ in 0..per_kind {
                pool.create(kind);
            }
        }
        pool
    }

    /// Create a new available resource of `kind`.
    pub fn create(&mut self, kind: ResourceKind) -> ResourceId {
        let id = ResourceId::new(self.next_id);
        self.next_id += 1;

        self.resources.insert(id, Resource::new(id, kind));
        self.available.push(id);
        id
    }

    /// Take a resource out of the available set.
    ///
    /// Fails with `ResourceNotFound` for unknown ids and
    /// `ResourceNotAvailable` if a story currently holds it.
    pub fn allocate(&mut self, id: ResourceId) -> Result<Resource> {
        let resource = *self
            .resources
            .get(&id)
            .ok_or(KanbanError::ResourceNotFound(id))?;

        let pos = self
            .available
            .iter()
            .position(|&r| r == id)
            .ok_or(KanbanError::ResourceNotAvailable(id))?;
        self.available.remove(pos);

        Ok(resource)
    }

    /// Return a resource to the available set.
    ///
    /// Idempotent: returns `false` without changes if the resource is
    /// already available or unknown.
    pub fn release(&mut self, id: ResourceId) -> bool {
        if !self.resources.contains_key(&id) || self.available.contains(&id) {
            return false;
        }
        self.available.push(id);
        true
    }

    /// Look up a resource wherever it currently is.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    /// Check if a resource is in the available set.
    #[must_use]
    pub fn is_available(&self, id: ResourceId) -> bool {
        self.available.contains(&id)
    }

    /// Number of available resources.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Available resources in waiting-area order.
    pub fn available(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.available.iter().filter_map(|id| self.resources.get(id))
    }

    /// Available resource ids in waiting-area order.
    #[must_use]
    pub fn available_ids(&self) -> &[ResourceId] {
        &self.available
    }

    /// Iterate over all resources, available or not, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        let mut all: Vec<_> = self.resources.values().collect();
        all.sort_by_key(|r| r.id);
        all.into_iter()
    }

    /// Total number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the pool owns no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
