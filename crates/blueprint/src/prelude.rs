//! Common imports for blueprint applications.
//!
//! ```ignore
//! use blueprint::prelude::*;
//! ```

pub use crate::ecs::{
    Components, Composer, Drawer, EntityId, EntityObserver, Entities, Identity, Logic, World,
    WorldInjector, components_of_type, validate,
};
pub use crate::error::{EcsError, FrameError};
pub use crate::input::{InputEvent, InputSample, InputSource, MouseButton, ScriptedInput};
pub use crate::math::{DVec2, IVec2};
pub use crate::pump::{FramePump, Game};
pub use crate::render::{Canvas, Color, Surface, TextureHandle};
