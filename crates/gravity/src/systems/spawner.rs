use blueprint::ecs::{Composer, Logic, WorldInjector};

use crate::component::{GravityAttraction, MouseEvents, MouseState, Position};
use crate::entity::{Block, GravityBlock};
use crate::textures::Textures;

/// Spawns a block on a left click and a gravity well on a right click, at the
/// cursor.
pub struct BlockSpawner {
    world: WorldInjector,
    textures: Textures,
    well: GravityAttraction,
}

impl BlockSpawner {
    pub fn new(textures: Textures, well: GravityAttraction) -> Self {
        Self {
            world: WorldInjector::new(),
            textures,
            well,
        }
    }
}

impl Logic for BlockSpawner {
    fn handle(&mut self, entity: &mut dyn Composer) {
        let Some(mouse) = entity.components().take::<MouseEvents>() else {
            return;
        };
        let at = Position::new(mouse.cursor.x as f64, mouse.cursor.y as f64);

        if mouse.left == MouseState::Clicked {
            log::trace!("spawning block at {}", at.0);
            if let Err(err) = self.world.spawn(Block::new(at, self.textures.block.clone())) {
                log::error!("failed to spawn block: {err}");
            }
        }

        if mouse.right == MouseState::Clicked {
            log::trace!("spawning gravity well at {}", at.0);
            let well = GravityBlock::new(at, self.textures.well.clone(), self.well);
            if let Err(err) = self.world.spawn(well) {
                log::error!("failed to spawn gravity well: {err}");
            }
        }
    }

    fn injector(&mut self) -> Option<&mut WorldInjector> {
        Some(&mut self.world)
    }
}
