use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blueprint::input::ScriptedInput;
use blueprint::pump::FramePump;
use blueprint::render::Color;
use clap::Parser;

use gravity::config::{CaptureConfig, GravityConfig};
use gravity::{Census, new_game};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless gravity sandbox runner")]
struct Cli {
    /// Path to a JSON config (stock sandbox when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Save rendered frames as PNG files in this directory
    #[arg(long)]
    capture_dir: Option<PathBuf>,

    /// Save every n-th frame (defaults to every frame)
    #[arg(long)]
    capture_every: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GravityConfig::load(path)?,
        None => GravityConfig::default(),
    };
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(dir) = cli.capture_dir {
        config.capture = Some(CaptureConfig {
            dir,
            every: cli.capture_every.unwrap_or(1),
        });
    } else if let (Some(every), Some(capture)) = (cli.capture_every, config.capture.as_mut()) {
        capture.every = every;
    }
    config.check()?;

    if let Some(capture) = &config.capture {
        fs::create_dir_all(&capture.dir)
            .with_context(|| format!("Failed to create capture dir {}", capture.dir.display()))?;
    }

    let input = ScriptedInput::new(config.script.clone());
    let mut world = new_game(&config, Box::new(input));
    let pump = FramePump::new(config.frames)
        .with_outside_size(config.width, config.height)
        .with_clear_color(Color(config.background));

    let mut captured = 0u64;
    let stats = pump
        .run(&mut world, |frame, canvas| {
            let Some(capture) = &config.capture else {
                return Ok(());
            };
            if capture.wants(frame) {
                canvas.save_png(capture.path_for(frame))?;
                captured += 1;
            }
            Ok(())
        })
        .context("Simulation aborted")?;

    println!(
        "Ran {} frames in {:.2?}: {}, {} frames captured",
        stats.frames,
        stats.elapsed,
        Census::of(&mut world),
        captured
    );
    Ok(())
}
