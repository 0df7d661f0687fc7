//! # System: Per-Entity Behavior
//!
//! A system is an object the [`World`](super::world::World) calls once per
//! entity, in registration order:
//!
//! - [`Logic`] systems run during [`update`](super::world::World::update) and
//!   may mutate components.
//! - [`Drawer`] systems run during [`draw`](super::world::World::draw) and
//!   render onto a [`Surface`]. They must not change entity state.
//!
//! Entities are heterogeneous, so "this entity doesn't have what I need" is the
//! normal case: systems look their components up and return early when they
//! are missing.
//!
//! ## Optional Capabilities
//!
//! Two hooks are opt-in, exposed through trait methods that return `None` by
//! default. The World asks once, at registration time:
//!
//! - [`Logic::injector`] → the system holds a [`WorldInjector`] and wants it
//!   bound so it can spawn entities, or read world state, while handling
//!   another one.
//! - [`Logic::observer`] → the system wants to hear about every entity
//!   registered from now on.
//!
//! ## Reading World State
//!
//! During a sweep the registry is mutably borrowed, so a system cannot hold a
//! reference to the World. Two read paths exist instead:
//!
//! - [`WorldInjector::size`] and [`WorldInjector::entity_count`] answer from a
//!   snapshot the World refreshes whenever an entity is registered. Spawns
//!   queued during the current sweep are not counted until it ends.
//! - [`Logic::prepare`] gets the whole [`Entities`] registry right before the
//!   sweep, for anything that needs component data from other entities.
//!
//! ## Comparison
//!
//! - **bevy_ecs**: Systems are functions with injected parameters, observers
//!   are registered separately and triggered by events.
//! - **Here**: Systems are trait objects visited per entity; spawning goes
//!   through a deferred queue that the World drains after each system's sweep.

use std::any::type_name;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::EcsError;
use crate::render::Surface;

use super::entity::Composer;
use super::world::Entities;

/// A per-tick behavior applied to every entity.
pub trait Logic {
    /// Short name for logs and diagnostics. Defaults to the type name.
    fn name(&self) -> &'static str {
        short_system_name(type_name::<Self>())
    }

    /// Called once per tick, right before this system's sweep.
    fn prepare(&mut self, _entities: &mut Entities) {}

    fn handle(&mut self, entity: &mut dyn Composer);

    fn injector(&mut self) -> Option<&mut WorldInjector> {
        None
    }

    fn observer(&mut self) -> Option<&mut dyn EntityObserver> {
        None
    }
}

/// A per-frame behavior that renders one entity at a time.
pub trait Drawer {
    fn name(&self) -> &'static str {
        short_system_name(type_name::<Self>())
    }

    fn draw(&mut self, entity: &mut dyn Composer, surface: &mut dyn Surface);

    fn injector(&mut self) -> Option<&mut WorldInjector> {
        None
    }

    fn observer(&mut self) -> Option<&mut dyn EntityObserver> {
        None
    }
}

/// Receives every entity registered after the observer itself was added.
pub trait EntityObserver {
    fn on_new_entity(&mut self, entity: &mut dyn Composer);
}

/// Spawns waiting to be registered, plus the World facts an injected system
/// may read.
#[derive(Default)]
pub(crate) struct Backlog {
    pub(crate) spawned: Vec<Box<dyn Composer>>,
    pub(crate) size: (u32, u32),
    /// Registered entities, not counting `spawned`.
    pub(crate) entity_count: usize,
}

/// Back-channel from a system to the World that owns it.
///
/// Embed one in a system and return it from [`Logic::injector`]; the World
/// binds it on registration. Entities spawned through it are registered when
/// the current system finishes its sweep.
#[derive(Default)]
pub struct WorldInjector {
    backlog: Option<Rc<RefCell<Backlog>>>,
}

impl WorldInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, backlog: Rc<RefCell<Backlog>>) {
        self.backlog = Some(backlog);
    }

    pub fn is_bound(&self) -> bool {
        self.backlog.is_some()
    }

    /// Queue `entity` for registration in the bound World.
    pub fn spawn<E: Composer + 'static>(&self, entity: E) -> Result<(), EcsError> {
        let Some(backlog) = &self.backlog else {
            log::warn!("dropping spawn of an entity: world injector is not bound");
            return Err(EcsError::Unbound);
        };
        backlog.borrow_mut().spawned.push(Box::new(entity));
        Ok(())
    }

    /// Logical width and height of the bound World.
    pub fn size(&self) -> Result<(u32, u32), EcsError> {
        self.backlog
            .as_ref()
            .map(|backlog| backlog.borrow().size)
            .ok_or(EcsError::Unbound)
    }

    /// Number of entities registered in the bound World. Entities spawned
    /// during the current sweep are not included yet.
    pub fn entity_count(&self) -> Result<usize, EcsError> {
        self.backlog
            .as_ref()
            .map(|backlog| backlog.borrow().entity_count)
            .ok_or(EcsError::Unbound)
    }
}

/// Strip the module path from a fully-qualified type name
/// (e.g. `gravity::systems::movement::MovementSystem` → `MovementSystem`).
pub(crate) fn short_system_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
