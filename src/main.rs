//! Pong Path entry point
//!
//! Runs a headless session of episodes with a built-in controller driving
//! the player paddle, logging per-episode results and printing a JSON
//! summary at the end.
//!
//! ```text
//! pong-path [--episodes N] [--controller tracking|exploring] [--seed S]
//!           [--speed N] [--max-frames N] [--settings PATH]
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pong_path::runner::SessionSummary;
use pong_path::{Controller, ExploringController, Headless, Runner, Settings, TrackingController};

/// Default exploration rate and per-episode decay for the exploring controller
const EXPLORE_RATE: f64 = 0.5;
const EXPLORE_DECAY: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ControllerKind {
    /// Steer straight for the predicted end point
    Tracking,
    /// Track, with a seeded share of random moves that decays per episode
    Exploring,
}

#[derive(Parser, Debug)]
#[command(name = "pong-path")]
#[command(about = "Headless Pong sessions with a built-in paddle controller")]
struct Args {
    /// Episodes to play
    #[arg(long, default_value_t = 10)]
    episodes: u64,
    /// Controller driving the player paddle
    #[arg(long, value_enum, default_value_t = ControllerKind::Exploring)]
    controller: ControllerKind,
    /// Seed for the exploring controller
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Ball and paddle speed; out-of-range values are ignored
    #[arg(long, allow_negative_numbers = true)]
    speed: Option<i64>,
    /// Stop after this many frames even if episodes are unfinished
    #[arg(long, default_value_t = 1_000_000)]
    max_frames: u64,
    /// Settings file to load at start and save at exit
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    log::info!("Pong Path (headless) starting: {:?}", args);

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(speed) = args.speed {
        if !settings.set_speed(speed) {
            log::warn!("Speed {} out of range, keeping {}", speed, settings.speed());
        }
    }
    settings.set_user_controlled(false);

    let mut runner = Runner::new(settings, Headless::with_frame_limit(args.max_frames));

    let summary = match args.controller {
        ControllerKind::Tracking => {
            let mut controller = TrackingController::new();
            run(&mut runner, &mut controller, args.episodes)
        }
        ControllerKind::Exploring => {
            let mut controller = ExploringController::new(args.seed, EXPLORE_RATE, EXPLORE_DECAY);
            run(&mut runner, &mut controller, args.episodes)
        }
    };

    if let Some(path) = &args.settings {
        runner.settings().save(path);
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not encode summary: {}", e),
    }
}

fn run(
    runner: &mut Runner<Headless>,
    controller: &mut dyn Controller,
    episodes: u64,
) -> SessionSummary {
    let summary = runner.run_session(controller, episodes);

    if summary.quit {
        log::warn!(
            "Frame limit reached after {} frames; {} of {} episodes finished",
            runner.frontend().frames(),
            summary.scores.len(),
            episodes
        );
    }
    if let (Some(best), Some(mean)) = (summary.best(), summary.mean()) {
        log::info!("Best score {}, mean {:.2}", best, mean);
    }

    summary
}
