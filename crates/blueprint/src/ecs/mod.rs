//! # Entity-Per-Struct ECS
//!
//! A deliberately small Entity Component System. Entities are ordinary Rust
//! structs that own their components; the [`World`] owns the entities and runs
//! systems over them once per frame.
//!
//! ## Module Overview
//!
//! - [`entity`]: Assign-once entity IDs and the [`Composer`] trait
//! - [`component`]: Borrowed component lists and entity validation
//! - [`system`]: Logic/draw system traits, observers, world injection
//! - [`world`]: Central container: registry, systems, frame cycle
//! - [`query`]: Lazy "every `T` in the world" iteration

pub mod component;
pub mod entity;
pub mod query;
pub mod system;
pub mod world;

pub use component::{Components, validate};
pub use entity::{Composer, EntityId, Identity};
pub use query::{ComponentsOfType, components_of_type};
pub use system::{Drawer, EntityObserver, Logic, WorldInjector};
pub use world::{Entities, World};

#[cfg(feature = "diagnostics")]
pub use world::SystemTiming;
