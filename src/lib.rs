//! Pong Path - deterministic Pong with analytic ball-path prediction
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, trajectory, episode)
//! - `control`: Observations, actions and the controller seam
//! - `runner`: Per-tick controller loop and frontend interface
//! - `settings`: Validated simulation settings
//! - `scoreboard`: Derived statistics for display

pub mod control;
pub mod runner;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use control::{Action, Controller, ExploringController, Observation, TrackingController};
pub use runner::{EpisodeOutcome, FrameInput, Frontend, Headless, Runner, Snapshot};
pub use scoreboard::Scoreboard;
pub use settings::{Settings, SettingsCommand};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: i32 = 1000;
    pub const ARENA_HEIGHT: i32 = 700;
    /// Wall thickness; also the ball's side length and the paddle width
    pub const LINE_THICKNESS: i32 = 20;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: i32 = 100;
    /// Gap between a side wall and the paddle facing it
    pub const PADDLE_INSET: i32 = 40;

    /// Rallies needed to end an episode (either side)
    pub const WIN_THRESHOLD: u32 = 7;
    /// Safety cap on player returns within one episode
    pub const HIT_CAP: u64 = 1_000_000_000;

    /// Speed bounds (inclusive)
    pub const MIN_SPEED: i32 = 0;
    pub const MAX_SPEED: i32 = 15;
    /// FPS bounds: exclusive lower, inclusive upper
    pub const MIN_FPS: u32 = 0;
    pub const MAX_FPS: u32 = 1500;
    pub const DEFAULT_FPS: u32 = 200;
    pub const DEFAULT_SPEED: i32 = 1;

    /// Side lines where a trajectory walk stops (x)
    pub const PATH_LEFT: i32 = LINE_THICKNESS + 2;
    pub const PATH_RIGHT: i32 = ARENA_WIDTH - LINE_THICKNESS - 2;
    /// Rail lines where a trajectory walk reflects (y), 1.5 wall thicknesses in
    pub const PATH_TOP: i32 = LINE_THICKNESS * 3 / 2;
    pub const PATH_BOTTOM: i32 = ARENA_HEIGHT - LINE_THICKNESS * 3 / 2;
    /// Vertical pull-back applied to every predicted trajectory end
    pub const SETTLE_OFFSET: i32 = 40;
}
