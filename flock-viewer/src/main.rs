use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_core::{Flock, SimRng, SimulationConfig};
use flock_viewer::{settings, App, HeadlessBackend};
use rand::SeedableRng;

/// Frames rendered by a headless run when `--frames` is not given
const DEFAULT_HEADLESS_FRAMES: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// On-screen OpenCV window (needs the `opencv-backend` feature)
    Window,
    /// Off-screen framebuffer, for benchmarking and CI
    Headless,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Boid flocking simulation", long_about = None)]
struct Args {
    /// Number of boids (overrides the config file)
    #[arg(short, long)]
    boids: Option<usize>,

    /// Seed for the initial positions and velocities; random if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to draw the simulation
    #[arg(long, value_enum, default_value_t = BackendKind::Window)]
    backend: BackendKind,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// JSON file with simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[cfg(feature = "opencv-backend")]
fn run_window(flock: Flock, frames: Option<u64>) -> Result<u64> {
    let backend = flock_viewer::window::OpenCvBackend::new();
    App::new(flock, backend).run(frames).context("Window backend failed")
}

#[cfg(not(feature = "opencv-backend"))]
fn run_window(_flock: Flock, _frames: Option<u64>) -> Result<u64> {
    Err(flock_viewer::ShellError::Unavailable("opencv")).context(
        "Rebuild with `--features opencv-backend` or pass `--backend headless`",
    )
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = match &args.config {
        Some(path) => settings::load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(boids) = args.boids {
        config = config.with_boid_count(boids);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Flocking simulation starting...");
    log::info!("Seed: {}", seed);
    log::info!("Backend: {:?}", args.backend);

    let mut rng = SimRng::seed_from_u64(seed);
    let flock = Flock::new(config, &mut rng).context("Failed to initialize flock")?;

    let frames = match args.backend {
        BackendKind::Window => run_window(flock, args.frames)?,
        BackendKind::Headless => {
            let frames = args.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
            App::new(flock, HeadlessBackend::new())
                .run(Some(frames))
                .context("Headless backend failed")?
        }
    };

    log::info!("Rendered {} frames", frames);
    Ok(())
}
