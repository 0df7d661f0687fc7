//! Components of the gravity sandbox.

use blueprint::math::{DVec2, IVec2};
use blueprint::render::TextureHandle;
use serde::Deserialize;

/// Position in logical pixels, sub-pixel precise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub DVec2);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Distance and offset from `self` to `other`.
    pub fn distance_to(&self, other: &Position) -> Distance {
        let delta = other.0 - self.0;
        Distance {
            distance: delta.length(),
            delta,
        }
    }
}

/// Result of [`Position::distance_to`]. `delta` points from the origin
/// position towards the other one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub distance: f64,
    pub delta: DVec2,
}

/// Displacement per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub DVec2);

/// What to draw for an entity. Nothing is drawn while `texture` is `None`.
#[derive(Debug, Clone, Default)]
pub struct Render {
    pub texture: Option<TextureHandle>,
}

impl Render {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
        }
    }
}

/// Per-button click edge machine.
///
/// ```text
/// None ──pressed──► Pressed ──released──► Clicked ──(next tick)──► None
/// ```
///
/// `Clicked` lasts exactly one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseState {
    #[default]
    None,
    Pressed,
    Clicked,
}

impl MouseState {
    /// The state after one tick in which the button was `pressed` or not.
    pub fn advance(self, pressed: bool) -> Self {
        match self {
            MouseState::None if pressed => MouseState::Pressed,
            MouseState::Pressed if !pressed => MouseState::Clicked,
            MouseState::Clicked => MouseState::None,
            current => current,
        }
    }
}

/// Cursor position and button states as of the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseEvents {
    pub cursor: IVec2,
    pub left: MouseState,
    pub right: MouseState,
}

/// Pulls every movable entity within `radius` towards the owner with a
/// constant `acceleration` (pixels per tick, per second).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GravityAttraction {
    pub radius: f64,
    pub acceleration: f64,
}

impl Default for GravityAttraction {
    fn default() -> Self {
        Self {
            radius: 150.0,
            acceleration: 10.0,
        }
    }
}

/// Marks an entity gravity never moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsStatic;
