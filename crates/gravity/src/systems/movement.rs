use blueprint::ecs::{Composer, Logic};

use crate::component::{Position, Velocity};

/// Explicit Euler step: `position += velocity` once per tick.
pub struct MovementSystem;

impl Logic for MovementSystem {
    fn handle(&mut self, entity: &mut dyn Composer) {
        let mut components = entity.components();
        let (Some(position), Some(velocity)) =
            (components.take::<Position>(), components.take::<Velocity>())
        else {
            return;
        };
        position.0 += velocity.0;
    }
}
