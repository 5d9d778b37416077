//! Headless runner: plays an attract-mode game with scripted input and logs
//! the title-bar status once a second.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -- --seconds 60 --seed 42

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate_rush::audio::LogSink;
use crate_rush::game::Collaborators;
use crate_rush::persistence::{FileStore, SaveData};
use crate_rush::platform::{DemoInput, FrameStats, PersistenceStore};
use crate_rush::sim::{GameState, PlayerId};
use crate_rush::{FrameController, FrameOutcome, Settings, Tuning};

#[derive(Parser)]
#[command(name = "crate-rush")]
#[command(about = "Run a headless two-player Crate Rush game")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of game time to simulate
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Settings file (JSON)
    #[arg(long, default_value = "data/settings.json")]
    settings: PathBuf,

    /// Tuning file (JSON); built-in balance if omitted
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Write both craft positions to the save slot when the run ends
    #[arg(long)]
    save_on_exit: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = Settings::load(&args.settings);
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let fps = args.fps.max(1);
    let dt = 1.0 / f64::from(fps);
    let total_frames = (args.seconds.max(0.0) * f64::from(fps)).round() as u64;

    log::info!("Crate Rush (headless) starting: seed {seed}, {} s at {fps} fps", args.seconds);

    let mut store = FileStore::new(settings.save_path.clone());
    let mut game = FrameController::new(GameState::new(seed, tuning), settings, Box::new(LogSink));
    let mut input = DemoInput::default();
    let mut stats = FrameStats::new();

    let mut outcome = FrameOutcome::Running;
    for n in 1..=total_frames {
        outcome = game.frame(
            dt,
            Collaborators {
                input: &mut input,
                renderer: &mut stats,
                store: &mut store,
            },
        );
        if n % u64::from(fps) == 0 {
            log::info!("{} | {} drawn", game.status_line(), stats.drawn());
        }
        if matches!(outcome, FrameOutcome::Quit | FrameOutcome::GameOver { .. }) {
            break;
        }
    }

    if args.save_on_exit {
        let state = game.state();
        let data = SaveData {
            player_one: state.player(PlayerId::One).pos(),
            player_two: state.player(PlayerId::Two).pos(),
        };
        store
            .save(&data)
            .with_context(|| format!("failed to save to {}", store.path().display()))?;
    }

    let state = game.state();
    log::info!(
        "Finished after {} ticks ({:?}): {}",
        state.time_ticks,
        outcome,
        game.status_line()
    );
    println!("{}", game.status_line());
    Ok(())
}
