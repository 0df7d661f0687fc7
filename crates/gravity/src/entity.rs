//! Entity variants of the gravity sandbox.
//!
//! ```text
//! Input         MouseEvents
//! Block         Position, Render, Velocity
//! GravityBlock  Block's components + GravityAttraction, IsStatic
//! ```

use blueprint::ecs::{Components, Composer, Identity};
use blueprint::render::TextureHandle;

use crate::component::{
    GravityAttraction, IsStatic, MouseEvents, Position, Render, Velocity,
};

/// Carries the mouse state the input system writes each tick.
#[derive(Default)]
pub struct Input {
    identity: Identity,
    pub mouse: MouseEvents,
}

impl Composer for Input {
    fn identity(&self) -> &Identity {
        &self.identity
    }
    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
    fn components(&mut self) -> Components<'_> {
        Components::new().with(&mut self.mouse)
    }
}

/// A free-moving square.
#[derive(Default)]
pub struct Block {
    identity: Identity,
    pub position: Position,
    pub velocity: Velocity,
    pub render: Render,
}

impl Block {
    pub fn new(position: Position, texture: TextureHandle) -> Self {
        Self {
            position,
            render: Render::new(texture),
            ..Self::default()
        }
    }
}

impl Composer for Block {
    fn identity(&self) -> &Identity {
        &self.identity
    }
    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
    fn components(&mut self) -> Components<'_> {
        Components::new()
            .with(&mut self.position)
            .with(&mut self.render)
            .with(&mut self.velocity)
    }
}

/// A static block that attracts everything around it.
#[derive(Default)]
pub struct GravityBlock {
    pub block: Block,
    pub gravity: GravityAttraction,
    pub is_static: IsStatic,
}

impl GravityBlock {
    pub fn new(position: Position, texture: TextureHandle, gravity: GravityAttraction) -> Self {
        Self {
            block: Block::new(position, texture),
            gravity,
            is_static: IsStatic,
        }
    }
}

impl Composer for GravityBlock {
    fn identity(&self) -> &Identity {
        self.block.identity()
    }
    fn identity_mut(&mut self) -> &mut Identity {
        self.block.identity_mut()
    }
    fn components(&mut self) -> Components<'_> {
        let own = Components::new()
            .with(&mut self.gravity)
            .with(&mut self.is_static);
        self.block.components().extend(own)
    }
}
