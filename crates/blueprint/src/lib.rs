//! # Blueprint: Minimal Entity Component System
//!
//! Entities are plain structs that own their components, systems are objects
//! visited once per entity per frame, and a [`World`](ecs::World) ties them
//! together. Around the core sit the boundaries a host crosses: a drawing
//! [`Surface`](render::Surface), an [`InputSource`](input::InputSource), and
//! the [`Game`](pump::Game) trait a frame loop drives.
//!
//! Start with `use blueprint::prelude::*`.

pub mod ecs;
pub mod error;
pub mod input;
pub mod math;
pub mod prelude;
pub mod pump;
pub mod render;
