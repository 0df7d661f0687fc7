//! # Entity: Identity Plus a Bundle of Components
//!
//! An entity here is a concrete Rust type that *owns* its components as plain
//! fields and implements [`Composer`] to expose them. The
//! [`World`](super::world::World) stores entities as `Box<dyn Composer>` and
//! never looks inside them except through that trait.
//!
//! ## Design: Assign-Once IDs
//!
//! Entities are never despawned, so there is no recycling and no need for
//! generations. IDs are handed out by the World from a counter:
//!
//! ```text
//! add_entity(a)  → a gets 0
//! add_entity(b)  → b gets 1
//! add_entity(b') → b' already has an ID: ignored, counter stays at 2
//! ```
//!
//! Every entity embeds an [`Identity`]. It starts unassigned and can be
//! assigned exactly once, and only by the World (assignment is crate-private).
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: Entity is a generational index and components live in
//!   archetype tables owned by the world.
//! - **Here**: Entity is a struct the caller defines; the ID is stamped into it
//!   on registration and the component storage stays inside the struct.

use std::fmt;

use crate::error::EcsError;

use super::component::Components;

/// Sequential identifier of an entity within one [`World`](super::world::World).
///
/// IDs start at 0 and double as the entity's index in the registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// Returns the raw index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assign-once ID slot embedded in every entity.
///
/// The default value is unassigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity {
    id: Option<EntityId>,
}

impl Identity {
    /// The assigned ID, or [`EcsError::NotInitialized`] before registration.
    pub fn id(&self) -> Result<EntityId, EcsError> {
        self.id.ok_or(EcsError::NotInitialized)
    }

    /// Returns `true` once an ID has been assigned.
    pub fn is_assigned(&self) -> bool {
        self.id.is_some()
    }

    /// Stamp `id` into this slot. Fails without touching state if an ID is
    /// already present.
    pub(crate) fn assign(&mut self, id: EntityId) -> Result<(), EcsError> {
        if self.id.is_some() {
            return Err(EcsError::AlreadyInitialized);
        }
        self.id = Some(id);
        Ok(())
    }
}

/// An entity: something with an [`Identity`] that exposes its components.
///
/// Implementors own their components as fields and return borrowed views of
/// them from [`components`](Composer::components). A variant that extends
/// another one holds the base as a field and concatenates its list:
///
/// ```ignore
/// fn components(&mut self) -> Components<'_> {
///     self.block
///         .components()
///         .with(&mut self.attraction)
///         .with(&mut self.is_static)
/// }
/// ```
pub trait Composer {
    fn identity(&self) -> &Identity;

    fn identity_mut(&mut self) -> &mut Identity;

    /// Borrowed, ordered view of this entity's components.
    fn components(&mut self) -> Components<'_>;

    /// Shorthand for `self.identity().id()`.
    fn id(&self) -> Result<EntityId, EcsError> {
        self.identity().id()
    }
}
