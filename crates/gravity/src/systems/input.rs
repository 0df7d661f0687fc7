use blueprint::ecs::{Composer, Entities, Logic};
use blueprint::input::{InputSample, InputSource};

use crate::component::MouseEvents;

/// Copies the input device state into every [`MouseEvents`] component.
///
/// The source is sampled once per tick, before the sweep.
pub struct InputChecker {
    source: Box<dyn InputSource>,
    sample: InputSample,
}

impl InputChecker {
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self {
            source,
            sample: InputSample::default(),
        }
    }
}

impl Logic for InputChecker {
    fn prepare(&mut self, _entities: &mut Entities) {
        self.sample = self.source.sample();
    }

    fn handle(&mut self, entity: &mut dyn Composer) {
        let Some(mouse) = entity.components().take::<MouseEvents>() else {
            return;
        };

        let left = mouse.left.advance(self.sample.left);
        let right = mouse.right.advance(self.sample.right);
        if left != mouse.left || right != mouse.right {
            log::trace!(
                "mouse at {}: left {:?} -> {left:?}, right {:?} -> {right:?}",
                self.sample.cursor,
                mouse.left,
                mouse.right
            );
        }

        mouse.cursor = self.sample.cursor;
        mouse.left = left;
        mouse.right = right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::MouseState;
    use crate::entity::Input;
    use blueprint::ecs::World;
    use blueprint::input::{InputEvent, MouseButton, ScriptedInput};
    use blueprint::math::IVec2;

    fn mouse(world: &mut World) -> MouseEvents {
        *world.components_of_type::<MouseEvents>().next().unwrap()
    }

    #[test]
    fn press_then_release_is_a_click() {
        let script = ScriptedInput::new(vec![
            InputEvent::at(1).cursor(30, 40).press(MouseButton::Left),
            InputEvent::at(2).release(MouseButton::Left),
        ]);
        let mut world = World::new(100, 100);
        world.add_entity(Input::default());
        world.add_logic(InputChecker::new(Box::new(script)));

        let mut states = Vec::new();
        for _ in 0..4 {
            world.update();
            states.push(mouse(&mut world).left);
        }

        assert_eq!(
            states,
            vec![
                MouseState::None,
                MouseState::Pressed,
                MouseState::Clicked,
                MouseState::None,
            ]
        );
        assert_eq!(mouse(&mut world).cursor, IVec2::new(30, 40));
        assert_eq!(mouse(&mut world).right, MouseState::None);
    }

    #[test]
    fn buttons_are_independent() {
        let script = ScriptedInput::new(vec![
            InputEvent::at(0).press(MouseButton::Right),
            InputEvent::at(1).press(MouseButton::Left).release(MouseButton::Right),
        ]);
        let mut world = World::new(100, 100);
        world.add_entity(Input::default());
        world.add_logic(InputChecker::new(Box::new(script)));

        world.update();
        let first = mouse(&mut world);
        assert_eq!((first.left, first.right), (MouseState::None, MouseState::Pressed));

        world.update();
        let second = mouse(&mut world);
        assert_eq!((second.left, second.right), (MouseState::Pressed, MouseState::Clicked));
    }
}
