//! Math types.
//!
//! We re-export the [glam](https://docs.rs/glam) types the crate uses so
//! applications don't need to depend on it directly. Simulation state is kept
//! in `f64` ([`DVec2`]); pixel and cursor coordinates are integers
//! ([`IVec2`]).

pub use glam::{DVec2, IVec2};

/// Truncate a simulation position to pixel coordinates.
pub fn to_pixel(position: DVec2) -> IVec2 {
    IVec2::new(position.x as i32, position.y as i32)
}
