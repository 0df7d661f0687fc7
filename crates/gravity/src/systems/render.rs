use blueprint::ecs::{Composer, Drawer};
use blueprint::math::to_pixel;
use blueprint::render::Surface;

use crate::component::{Position, Render};

/// Draws each entity's texture centered on its position.
pub struct RenderSystem;

impl Drawer for RenderSystem {
    fn draw(&mut self, entity: &mut dyn Composer, surface: &mut dyn Surface) {
        let mut components = entity.components();
        let (Some(render), Some(position)) =
            (components.take::<Render>(), components.take::<Position>())
        else {
            return;
        };
        let Some(texture) = &render.texture else {
            return;
        };

        let shift_x = (texture.width() / 2) as i32;
        let shift_y = (texture.height() / 2) as i32;
        let at = to_pixel(position.0);
        surface.draw_texture(texture, at.x - shift_x, at.y - shift_y);
    }
}
