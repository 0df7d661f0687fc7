//! Constant-acceleration gravity wells.
//!
//! Every entity that carries both a [`GravityAttraction`] and a [`Position`]
//! becomes a well the moment it is registered. Each tick, every movable entity
//! within a well's radius is accelerated towards it:
//!
//! ```text
//! velocity += acceleration * (well - target) / distance / ticks_per_second
//! ```
//!
//! The pull does not weaken with distance; it simply stops past `radius`.
//! Entities marked [`IsStatic`] are never pulled, but can still pull others.

use blueprint::ecs::{Composer, Entities, EntityId, EntityObserver, Logic};

use crate::component::{GravityAttraction, IsStatic, Position, Velocity};

/// A well as seen at the start of the current tick.
#[derive(Debug, Clone, Copy)]
struct Well {
    attraction: GravityAttraction,
    position: Position,
}

/// Accelerates movable entities towards nearby gravity wells.
pub struct GravitySystem {
    ticks_per_second: f64,
    sources: Vec<EntityId>,
    wells: Vec<Well>,
}

impl GravitySystem {
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            ticks_per_second,
            sources: Vec::new(),
            wells: Vec::new(),
        }
    }

    /// Number of wells this system knows about.
    pub fn well_count(&self) -> usize {
        self.sources.len()
    }
}

impl Default for GravitySystem {
    fn default() -> Self {
        Self::new(crate::TICKS_PER_SECOND)
    }
}

impl EntityObserver for GravitySystem {
    fn on_new_entity(&mut self, entity: &mut dyn Composer) {
        let is_well = {
            let mut components = entity.components();
            components.take::<GravityAttraction>().is_some() && components.take::<Position>().is_some()
        };
        if !is_well {
            return;
        }
        if let Ok(id) = entity.id() {
            log::debug!("entity {id} is a gravity well");
            self.sources.push(id);
        }
    }
}

impl Logic for GravitySystem {
    fn prepare(&mut self, entities: &mut Entities) {
        self.wells.clear();
        for &id in &self.sources {
            let Some(entity) = entities.get_mut(id) else {
                continue;
            };
            let mut components = entity.components();
            if let (Some(attraction), Some(position)) = (
                components.take::<GravityAttraction>(),
                components.take::<Position>(),
            ) {
                self.wells.push(Well {
                    attraction: *attraction,
                    position: *position,
                });
            }
        }
    }

    fn handle(&mut self, entity: &mut dyn Composer) {
        let mut components = entity.components();
        if components.has::<IsStatic>() {
            return;
        }
        let (Some(position), Some(velocity)) =
            (components.take::<Position>(), components.take::<Velocity>())
        else {
            return;
        };

        for well in &self.wells {
            let dist = position.distance_to(&well.position);
            if dist.distance > well.attraction.radius || dist.distance == 0.0 {
                continue;
            }
            velocity.0 +=
                well.attraction.acceleration * dist.delta / dist.distance / self.ticks_per_second;
        }
    }

    fn observer(&mut self) -> Option<&mut dyn EntityObserver> {
        Some(self)
    }
}
