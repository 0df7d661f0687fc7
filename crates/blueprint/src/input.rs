//! Mouse input: button state tracking and input sources.
//!
//! An [`InputSource`] is polled once per logic tick and returns an
//! [`InputSample`]: the absolute cursor position and which buttons are held.
//! A window backend would build samples from its event queue; the crate ships
//! [`ScriptedInput`], which replays a timeline of [`InputEvent`]s so runs are
//! reproducible without a display.
//!
//! [`Input`] tracks held / just-pressed / just-released state across samples
//! for anything hashable.

use std::collections::HashSet;
use std::hash::Hash;

use glam::IVec2;
use serde::Deserialize;

/// A mouse button the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
}

/// Tracks the state of a set of inputs (keys or mouse buttons).
///
/// - `pressed`: currently held down
/// - `just_pressed`: went down since the last `clear_just`
/// - `just_released`: went up since the last `clear_just`
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Mark `input` as held. Repeated presses are ignored.
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Mark `input` as released. Releasing an input that isn't held is ignored.
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Forget the edges recorded since the last call.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The input state at one logic tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    /// Absolute cursor position in logical pixels.
    pub cursor: IVec2,
    pub left: bool,
    pub right: bool,
}

impl InputSample {
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
        }
    }
}

/// Polled once per logic tick by whatever system consumes input.
pub trait InputSource {
    fn sample(&mut self) -> InputSample;
}

/// One scripted change, applied at the start of tick `tick`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputEvent {
    pub tick: u64,
    pub cursor: Option<[i32; 2]>,
    pub press: Option<MouseButton>,
    pub release: Option<MouseButton>,
}

impl InputEvent {
    pub fn at(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn cursor(mut self, x: i32, y: i32) -> Self {
        self.cursor = Some([x, y]);
        self
    }

    pub fn press(mut self, button: MouseButton) -> Self {
        self.press = Some(button);
        self
    }

    pub fn release(mut self, button: MouseButton) -> Self {
        self.release = Some(button);
        self
    }
}

/// Replays a timeline of [`InputEvent`]s.
///
/// The first `sample` is tick 0. Each sample applies every event whose `tick`
/// equals the current tick (cursor first, then press, then release), reports
/// the resulting state, and advances the tick. Events for ticks already
/// passed are never applied.
pub struct ScriptedInput {
    events: Vec<InputEvent>,
    next: usize,
    tick: u64,
    cursor: IVec2,
    buttons: Input<MouseButton>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|event| event.tick);
        Self {
            events,
            next: 0,
            tick: 0,
            cursor: IVec2::ZERO,
            buttons: Input::new(),
        }
    }

    /// The tick the next `sample` call will report.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns `true` once every event has been applied.
    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    pub fn buttons(&self) -> &Input<MouseButton> {
        &self.buttons
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSample {
        self.buttons.clear_just();

        while let Some(event) = self.events.get(self.next) {
            if event.tick > self.tick {
                break;
            }
            self.next += 1;
            if event.tick < self.tick {
                continue;
            }
            if let Some([x, y]) = event.cursor {
                self.cursor = IVec2::new(x, y);
            }
            if let Some(button) = event.press {
                log::trace!("tick {}: {button:?} down at {}", self.tick, self.cursor);
                self.buttons.press(button);
            }
            if let Some(button) = event.release {
                log::trace!("tick {}: {button:?} up at {}", self.tick, self.cursor);
                self.buttons.release(button);
            }
        }

        self.tick += 1;
        InputSample {
            cursor: self.cursor,
            left: self.buttons.pressed(MouseButton::Left),
            right: self.buttons.pressed(MouseButton::Right),
        }
    }
}
