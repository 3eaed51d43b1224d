//! Resource allocation rule.
//!
//! A resource may only be attached to a story whose current stage its kind
//! works: analysts on `analyzed-in-progress`, developers on
//! `developed-in-progress`, testers on `testing`. Moving a resource between
//! stories, or between a story and the pool, happens in a single call so
//! no intermediate "unallocated" state is ever observable.

use tracing::debug;

use crate::core::error::{KanbanError, Result};
use crate::core::ids::{ResourceId, StoryId};
use crate::core::state::BoardState;
use crate::events::{BoardEvent, Holder};

/// Outcome of an accepted allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// The resource moved to the story from `from`.
    Attached { from: Holder },
    /// The story already held the resource; nothing changed.
    AlreadyHeld,
}

/// Attach a resource to a story, taking it from wherever it is.
///
/// Rejected without side effects if the resource or story is unknown, or
/// the resource kind does not work the story's current stage.
pub fn attempt_allocate(
    state: &mut BoardState,
    resource_id: ResourceId,
    target: StoryId,
) -> Result<Allocation> {
    let resource = *state
        .pool
        .get(resource_id)
        .ok_or(KanbanError::ResourceNotFound(resource_id))?;
    let story = state.stories.require(target)?;

    if !resource.kind.can_work(story.stage) {
        debug!(%resource, story = %target, stage = %story.stage, "allocation rejected");
        return Err(KanbanError::KindMismatch {
            resource: resource_id,
            kind: resource.kind,
            stage: story.stage,
        });
    }
    if story.holds(resource_id) {
        return Ok(Allocation::AlreadyHeld);
    }

    let from = state
        .holder_of(resource_id)
        .ok_or(KanbanError::ResourceNotAvailable(resource_id))?;
    match from {
        Holder::Pool => {
            state.pool.allocate(resource_id)?;
        }
        Holder::Story(origin) => {
            state.stories.require_mut(origin)?.detach(resource_id);
        }
    }
    state.stories.require_mut(target)?.attach(resource_id);

    debug!(%resource, ?from, story = %target, "resource allocated");
    state.events.record(BoardEvent::ResourceAllocated {
        resource: resource_id,
        from,
        to: target,
    });
    Ok(Allocation::Attached { from })
}

/// Send a resource back to the available pool.
///
/// Idempotent: returns `Ok(false)` if the resource is already available.
pub fn return_to_pool(state: &mut BoardState, resource_id: ResourceId) -> Result<bool> {
    if state.pool.get(resource_id).is_none() {
        return Err(KanbanError::ResourceNotFound(resource_id));
    }

    match state.holder_of(resource_id) {
        Some(Holder::Story(origin)) => {
            state.stories.require_mut(origin)?.detach(resource_id);
            state.pool.release(resource_id);

            debug!(resource = %resource_id, story = %origin, "resource returned");
            state.events.record(BoardEvent::ResourceReturned {
                resource: resource_id,
                from: origin,
            });
            Ok(true)
        }
        Some(Holder::Pool) | None => Ok(state.pool.release(resource_id)),
    }
}

/// Return every resource held by a story to the pool.
///
/// Returns how many resources moved. A second call in a row returns 0 and
/// leaves the pool unchanged.
pub fn reclaim(state: &mut BoardState, story_id: StoryId) -> Result<usize> {
    let held = state.stories.require_mut(story_id)?.take_allocated();

    for &resource in &held {
        state.pool.release(resource);
        state.events.record(BoardEvent::ResourceReturned {
            resource,
            from: story_id,
        });
    }

    if !held.is_empty() {
        debug!(story = %story_id, count = held.len(), "resources reclaimed");
    }
    Ok(held.len())
}
