//! # Gravity: Click-to-Spawn Gravity Sandbox
//!
//! Left click drops a block, right click drops a static gravity well. Blocks
//! within a well's radius are pulled towards it at a constant rate and keep
//! their momentum.
//!
//! [`new_game`] assembles the [`World`]: one input entity, the render system,
//! and the logic systems in the order input → spawn → gravity → movement.

pub mod component;
pub mod config;
pub mod entity;
pub mod systems;
pub mod textures;

use std::fmt;

use blueprint::ecs::World;
use blueprint::input::InputSource;

use crate::component::{GravityAttraction, IsStatic, Position};
use crate::config::GravityConfig;
use crate::entity::Input;
use crate::systems::{BlockSpawner, GravitySystem, InputChecker, MovementSystem, RenderSystem};
use crate::textures::Textures;

/// Logic ticks per second of the reference timebase.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Build the sandbox world, reading input from `input`.
pub fn new_game(config: &GravityConfig, input: Box<dyn InputSource>) -> World {
    let textures = Textures::from_config(config);
    let mut world = World::new(config.width, config.height);

    world.add_entity(Input::default());
    world.add_drawer(RenderSystem);
    world
        .add_logic(InputChecker::new(input))
        .add_logic(BlockSpawner::new(textures, config.well))
        .add_logic(GravitySystem::new(config.ticks_per_second))
        .add_logic(MovementSystem);

    log::debug!(
        "gravity sandbox ready: {}x{}, {} ticks/s",
        config.width,
        config.height,
        config.ticks_per_second
    );
    world
}

/// Entity counts of a running sandbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub entities: usize,
    pub blocks: usize,
    pub wells: usize,
}

impl Census {
    pub fn of(world: &mut World) -> Self {
        let entities = world.len();
        let wells = world.components_of_type::<GravityAttraction>().count();
        let statics = world.components_of_type::<IsStatic>().count();
        let bodies = world.components_of_type::<Position>().count();
        Self {
            entities,
            blocks: bodies - statics,
            wells,
        }
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities, {} blocks, {} wells",
            self.entities, self.blocks, self.wells
        )
    }
}
