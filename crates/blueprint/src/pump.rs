//! # Frame Pump: Headless Host Loop
//!
//! A host drives a [`Game`] once per frame:
//!
//! ```text
//! layout(outside) → (w, h)      resize the canvas if needed
//! canvas.clear(clear_color)
//! update()?                     an error aborts the run
//! draw(&mut canvas)
//! hook(frame, &canvas)?         capture, assertions, ...
//! ```
//!
//! A windowed host runs the same sequence at the display's pace. The
//! [`FramePump`] runs it back to back for a fixed number of frames, which
//! makes runs deterministic.
//!
//! # Example
//!
//! ```ignore
//! let mut world = World::new(600, 600);
//! // ... add entities and systems ...
//! let stats = FramePump::new(120).run(&mut world, |_, _| Ok(()))?;
//! assert_eq!(stats.frames, 120);
//! ```

use std::time::{Duration, Instant};

use crate::ecs::World;
use crate::error::FrameError;
use crate::render::{Canvas, Color, Surface};

/// Anything a host can drive frame by frame.
pub trait Game {
    /// Logical screen size for a host window of the given outside size.
    fn layout(&self, outside_width: u32, outside_height: u32) -> (u32, u32);

    /// Advance one logic tick.
    fn update(&mut self) -> Result<(), FrameError>;

    /// Render the current state.
    fn draw(&mut self, surface: &mut dyn Surface);
}

impl Game for World {
    fn layout(&self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        World::layout(self, outside_width, outside_height)
    }

    fn update(&mut self) -> Result<(), FrameError> {
        World::update(self);
        Ok(())
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        World::draw(self, surface);
    }
}

/// Summary of a finished [`FramePump::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpStats {
    pub frames: u64,
    pub elapsed: Duration,
}

/// Runs a [`Game`] for a fixed number of frames onto a [`Canvas`].
#[derive(Debug, Clone)]
pub struct FramePump {
    frames: u64,
    outside: (u32, u32),
    clear_color: Color,
}

impl FramePump {
    pub fn new(frames: u64) -> Self {
        Self {
            frames,
            outside: (0, 0),
            clear_color: Color::BLACK,
        }
    }

    /// Outside size passed to [`Game::layout`] (builder pattern).
    pub fn with_outside_size(mut self, width: u32, height: u32) -> Self {
        self.outside = (width, height);
        self
    }

    /// Color the canvas is cleared to before every frame (builder pattern).
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run every frame, handing each rendered canvas to `hook`.
    ///
    /// Stops at the first error from `update` or `hook` and returns it.
    pub fn run<G, F>(&self, game: &mut G, mut hook: F) -> Result<PumpStats, FrameError>
    where
        G: Game + ?Sized,
        F: FnMut(u64, &Canvas) -> Result<(), FrameError>,
    {
        let start = Instant::now();
        let (width, height) = game.layout(self.outside.0, self.outside.1);
        let mut canvas = Canvas::new(width, height);
        log::info!("running {} frames at {width}x{height}", self.frames);

        for frame in 0..self.frames {
            let size = game.layout(self.outside.0, self.outside.1);
            if size != canvas.size() {
                log::debug!("layout changed to {}x{} at frame {frame}", size.0, size.1);
                canvas = Canvas::new(size.0, size.1);
            }
            canvas.clear(self.clear_color);

            if let Err(err) = game.update() {
                log::error!("update failed at frame {frame}: {err}");
                return Err(err);
            }
            game.draw(&mut canvas);
            hook(frame, &canvas)?;
        }

        let stats = PumpStats {
            frames: self.frames,
            elapsed: start.elapsed(),
        };
        log::info!("finished {} frames in {:?}", stats.frames, stats.elapsed);
        Ok(stats)
    }
}
