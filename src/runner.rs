//! Frame loop
//!
//! Each frame the runner reads input from the [`Frontend`], moves the player
//! paddle (from human keys or from the [`Controller`]), steps the episode,
//! hands the frontend a [`Snapshot`] and lets it pace the frame. When an
//! episode ends the controller is told the final score.

use serde::{Deserialize, Serialize};

use crate::control::{Action, Controller, Observation};
use crate::scoreboard::Scoreboard;
use crate::settings::{Settings, SettingsCommand};
use crate::sim::{Episode, Outcome, Rect, Segment};

/// Input gathered by the frontend for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Window closed / quit requested
    pub quit: bool,
    /// Up key held
    pub up: bool,
    /// Down key held
    pub down: bool,
    /// Settings bar presses since the last frame
    pub commands: Vec<SettingsCommand>,
}

/// Read-only view of a frame for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: Rect,
    pub player: Rect,
    pub ai: Rect,
    pub hits: u64,
    pub wins: u32,
    pub losses: u32,
    pub iteration: u64,
    pub fps: u32,
    pub speed: i32,
    /// Predicted ball path, when path lines are switched on
    pub path: Option<Vec<Segment>>,
    /// Statistics panel, when stats are switched on
    pub stats: Option<Scoreboard>,
}

impl Snapshot {
    pub fn capture(episode: &Episode, settings: &Settings) -> Self {
        let path = settings
            .lines()
            .then(|| episode.trajectory().segments().collect());
        let stats = settings
            .show_stats()
            .then(|| Scoreboard::from_episode(episode));

        Self {
            ball: episode.ball.rect,
            player: episode.player.rect,
            ai: episode.ai.rect,
            hits: episode.hits,
            wins: episode.wins,
            losses: episode.losses,
            iteration: episode.iteration,
            fps: settings.fps(),
            speed: settings.speed(),
            path,
            stats,
        }
    }
}

/// Display, input and clock
pub trait Frontend {
    /// Collect input for the coming frame
    fn poll(&mut self) -> FrameInput;

    /// Show the frame that was just simulated
    fn present(&mut self, snapshot: &Snapshot);

    /// Wait out the rest of the frame
    fn pace(&mut self, fps: u32);
}

/// Frontend with no window, no input and no frame pacing.
///
/// With a frame limit it asks to quit once that many frames have been
/// shown, which bounds sessions where neither side ever misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless {
    frame_limit: Option<u64>,
    frames: u64,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_limit(limit: u64) -> Self {
        Self {
            frame_limit: Some(limit),
            frames: 0,
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Frontend for Headless {
    fn poll(&mut self) -> FrameInput {
        FrameInput {
            quit: self.frame_limit.is_some_and(|limit| self.frames >= limit),
            ..Default::default()
        }
    }

    fn present(&mut self, _snapshot: &Snapshot) {
        self.frames += 1;
    }

    fn pace(&mut self, _fps: u32) {}
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The frontend asked to quit; nothing was simulated
    Quit,
    /// One tick was simulated
    Stepped(Option<Outcome>),
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// Reached a win/loss threshold; the controller was given `score`
    Finished { score: i64, ticks: u64 },
    /// Quit before the episode ended
    Quit,
}

/// Results of a run of episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Final score of each finished episode
    pub scores: Vec<i64>,
    /// Session was cut short by a quit request
    pub quit: bool,
}

impl SessionSummary {
    pub fn best(&self) -> Option<i64> {
        self.scores.iter().copied().max()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.scores.is_empty() {
            None
        } else {
            Some(self.scores.iter().sum::<i64>() as f64 / self.scores.len() as f64)
        }
    }
}

/// Owns the settings and the current episode, and runs frames against a frontend
pub struct Runner<F: Frontend> {
    settings: Settings,
    frontend: F,
    episode: Episode,
    last_action: Option<Action>,
    /// Hit count at the last observation
    prev_hits: u64,
}

impl<F: Frontend> Runner<F> {
    pub fn new(settings: Settings, frontend: F) -> Self {
        let episode = Episode::new(settings.speed(), 0);
        Self {
            settings,
            frontend,
            episode,
            last_action: None,
            prev_hits: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn episode_mut(&mut self) -> &mut Episode {
        &mut self.episode
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Change the speed of the ball and both paddles. Out-of-range values are ignored.
    pub fn update_speed(&mut self, speed: i64) -> bool {
        if self.settings.set_speed(speed) {
            self.episode.set_speed(self.settings.speed());
            true
        } else {
            false
        }
    }

    /// Change the frame rate. Out-of-range values are ignored.
    pub fn update_fps(&mut self, fps: i64) -> bool {
        self.settings.set_fps(fps)
    }

    pub fn set_user_controlled(&mut self, user_controlled: bool) {
        self.settings.set_user_controlled(user_controlled);
    }

    /// Apply a settings-bar command, pushing speed changes into the episode
    pub fn apply_command(&mut self, command: SettingsCommand) -> bool {
        let changed = self.settings.apply(command);
        if changed {
            self.episode.set_speed(self.settings.speed());
        }
        changed
    }

    /// Replace the current episode with a fresh one
    pub fn start_episode(&mut self, iteration: u64) {
        self.episode = Episode::new(self.settings.speed(), iteration);
        self.last_action = None;
        self.prev_hits = 0;
        log::info!("Episode {} started (speed {})", iteration, self.settings.speed());
    }

    /// Current observation, as the controller would see it
    pub fn observe(&self) -> Observation {
        Observation::capture(&self.episode, self.last_action, self.prev_hits)
    }

    /// Run one frame
    pub fn tick(&mut self, controller: &mut dyn Controller) -> Frame {
        let input = self.frontend.poll();
        if input.quit {
            return Frame::Quit;
        }
        for command in input.commands {
            self.apply_command(command);
        }

        let speed = self.episode.player.speed;
        if self.settings.user_controlled() {
            if input.up {
                self.episode.player.move_by(-speed);
            } else if input.down {
                self.episode.player.move_by(speed);
            }
        } else {
            let observation = self.observe();
            self.prev_hits = self.episode.hits;

            let action = controller.control(&observation);
            self.episode.player.move_by(action.paddle_delta(speed));
            self.last_action = Some(action);
        }

        let outcome = self.episode.update();

        let snapshot = Snapshot::capture(&self.episode, &self.settings);
        self.frontend.present(&snapshot);
        self.frontend.pace(self.settings.fps());

        Frame::Stepped(outcome)
    }

    /// Run frames until the current episode ends, then report to the controller
    pub fn play_out(&mut self, controller: &mut dyn Controller) -> EpisodeOutcome {
        while !self.episode.is_over() {
            if self.tick(controller) == Frame::Quit {
                log::info!("Quit during episode {}", self.episode.iteration);
                return EpisodeOutcome::Quit;
            }
        }

        let score = self.episode.score();
        log::info!(
            "Episode {} over after {} ticks: hits {}, wins {}, losses {}, score {}",
            self.episode.iteration,
            self.episode.time_ticks,
            self.episode.hits,
            self.episode.wins,
            self.episode.losses,
            score
        );
        controller.gameover(score);

        EpisodeOutcome::Finished {
            score,
            ticks: self.episode.time_ticks,
        }
    }

    /// Start episode `iteration` and play it to the end
    pub fn run_episode(&mut self, controller: &mut dyn Controller, iteration: u64) -> EpisodeOutcome {
        self.start_episode(iteration);
        self.play_out(controller)
    }

    /// Play `episodes` episodes back to back, stopping early on quit
    pub fn run_session(&mut self, controller: &mut dyn Controller, episodes: u64) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for iteration in 0..episodes {
            match self.run_episode(controller, iteration) {
                EpisodeOutcome::Finished { score, .. } => summary.scores.push(score),
                EpisodeOutcome::Quit => {
                    summary.quit = true;
                    break;
                }
            }
        }
        summary
    }
}
