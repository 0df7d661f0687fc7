//! Run configuration, loaded from JSON.
//!
//! Every field is optional; an empty object `{}` is the stock 600×600 sandbox
//! with no scripted input.
//!
//! ```json
//! {
//!   "frames": 240,
//!   "well": { "radius": 120 },
//!   "script": [
//!     { "tick": 1, "cursor": [300, 300], "press": "right" },
//!     { "tick": 2, "release": "right" }
//!   ],
//!   "capture": { "dir": "frames", "every": 30 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use blueprint::input::InputEvent;
use serde::Deserialize;

use crate::component::GravityAttraction;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub width: u32,
    pub height: u32,
    pub ticks_per_second: f64,
    pub frames: u64,
    pub block_size: u32,
    pub block_color: [u8; 4],
    pub well_color: [u8; 4],
    pub background: [u8; 4],
    /// Attraction of wells spawned by a right click.
    pub well: GravityAttraction,
    pub script: Vec<InputEvent>,
    pub capture: Option<CaptureConfig>,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            ticks_per_second: crate::TICKS_PER_SECOND,
            frames: 600,
            block_size: 16,
            block_color: [255, 255, 255, 255],
            well_color: [255, 100, 100, 255],
            background: [0, 0, 0, 255],
            well: GravityAttraction::default(),
            script: Vec::new(),
            capture: None,
        }
    }
}

/// Save every `every`-th frame as `frame_NNNNN.png` under `dir`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptureConfig {
    pub dir: PathBuf,
    #[serde(default = "default_capture_every")]
    pub every: u64,
}

fn default_capture_every() -> u64 {
    1
}

impl CaptureConfig {
    /// Returns `true` if `frame` should be saved.
    pub fn wants(&self, frame: u64) -> bool {
        self.every > 0 && frame % self.every == 0
    }

    pub fn path_for(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("frame_{frame:05}.png"))
    }
}

impl GravityConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.check()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn check(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "screen size must be non-zero");
        ensure!(
            self.ticks_per_second > 0.0,
            "ticks_per_second must be positive, got {}",
            self.ticks_per_second
        );
        if let Some(capture) = &self.capture {
            ensure!(capture.every > 0, "capture.every must be at least 1");
        }
        Ok(())
    }
}
