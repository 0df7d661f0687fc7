//! Textures shared by the spawner and the renderer.

use blueprint::render::{Color, TextureHandle};

use crate::config::GravityConfig;

/// The square textures blocks and wells are drawn with.
#[derive(Debug, Clone)]
pub struct Textures {
    pub block: TextureHandle,
    pub well: TextureHandle,
}

impl Textures {
    pub fn from_config(config: &GravityConfig) -> Self {
        let size = config.block_size;
        Self {
            block: TextureHandle::solid(size, size, Color(config.block_color)),
            well: TextureHandle::solid(size, size, Color(config.well_color)),
        }
    }
}
