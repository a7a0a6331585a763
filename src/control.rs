//! Controller seam for the player paddle
//!
//! An automated controller sees one [`Observation`] per tick and answers
//! with an [`Action`]. The call blocks the tick: a slow controller slows the
//! game down rather than letting frames go by unobserved.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::Episode;

/// What the controller wants the player paddle to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Code 0: move down by one speed step
    Down,
    /// Code 1: move up by one speed step
    Up,
    /// Any other code: stay put
    Idle,
}

impl Action {
    /// Map an external action code. Only 0 and 1 move the paddle.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Action::Down,
            1 => Action::Up,
            _ => Action::Idle,
        }
    }

    /// Vertical paddle movement for a given speed (screen y grows downward)
    pub fn paddle_delta(self, speed: i32) -> i32 {
        match self {
            Action::Down => speed,
            Action::Up => -speed,
            Action::Idle => 0,
        }
    }
}

/// Per-tick view of the game handed to a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Action returned on the previous tick, if any
    pub last_action: Option<Action>,
    /// Player paddle center y
    pub paddle_position: i32,
    /// Ball center
    pub ball_x: i32,
    pub ball_y: i32,
    /// Predicted ball position at the far side, pulled 40 px back vertically
    pub ball_end_x: i32,
    pub ball_end_y: i32,
    /// hits + wins - losses
    pub score: i64,
    /// Player returned the ball since the previous observation
    pub score_increased: bool,
}

impl Observation {
    /// Observe an episode. `prev_hits` is the hit count at the previous observation.
    pub fn capture(episode: &Episode, last_action: Option<Action>, prev_hits: u64) -> Self {
        let ball = episode.ball.center();
        let end = episode.trajectory().absolute_end();
        Self {
            last_action,
            paddle_position: episode.player.center_y(),
            ball_x: ball.x,
            ball_y: ball.y,
            ball_end_x: end.x,
            ball_end_y: end.y,
            score: episode.score(),
            score_increased: prev_hits < episode.hits,
        }
    }

    /// Signed gap between the paddle center and the predicted end
    pub fn end_offset(&self) -> i32 {
        self.paddle_position - self.ball_end_y
    }
}

/// Drives the player paddle
pub trait Controller {
    /// Choose an action for this tick
    fn control(&mut self, observation: &Observation) -> Action;

    /// Episode ended with the given final score
    fn gameover(&mut self, score: i64);
}

/// Steers the paddle center onto the predicted end point
#[derive(Debug, Clone, Default)]
pub struct TrackingController {
    scores: Vec<i64>,
}

impl TrackingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Final scores of finished episodes, oldest first
    pub fn scores(&self) -> &[i64] {
        &self.scores
    }
}

impl Controller for TrackingController {
    fn control(&mut self, observation: &Observation) -> Action {
        match observation.end_offset() {
            d if d > 0 => Action::Up,
            d if d < 0 => Action::Down,
            _ => Action::Idle,
        }
    }

    fn gameover(&mut self, score: i64) {
        self.scores.push(score);
    }
}

/// Tracks the predicted end point but sometimes moves at random.
///
/// The exploration rate shrinks by `decay` after every episode, so early
/// episodes wander and later ones mostly track.
#[derive(Debug, Clone)]
pub struct ExploringController {
    rng: Pcg32,
    explore_rate: f64,
    decay: f64,
    scores: Vec<i64>,
}

impl ExploringController {
    pub fn new(seed: u64, explore_rate: f64, decay: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            explore_rate: explore_rate.clamp(0.0, 1.0),
            decay: decay.clamp(0.0, 1.0),
            scores: Vec::new(),
        }
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    pub fn scores(&self) -> &[i64] {
        &self.scores
    }
}

impl Controller for ExploringController {
    fn control(&mut self, observation: &Observation) -> Action {
        if self.rng.random_bool(self.explore_rate) {
            if self.rng.random_bool(0.5) {
                Action::Up
            } else {
                Action::Down
            }
        } else if observation.end_offset() > 0 {
            Action::Up
        } else {
            Action::Down
        }
    }

    fn gameover(&mut self, score: i64) {
        self.scores.push(score);
        self.explore_rate *= self.decay;
        log::debug!(
            "Exploring controller: episode {} scored {}, explore rate now {:.3}",
            self.scores.len(),
            score,
            self.explore_rate
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Ball;
    use glam::IVec2;

    fn observation(paddle: i32, end: i32) -> Observation {
        Observation {
            last_action: None,
            paddle_position: paddle,
            ball_x: 500,
            ball_y: 350,
            ball_end_x: PATH_RIGHT,
            ball_end_y: end,
            score: 0,
            score_increased: false,
        }
    }

    #[test]
    fn test_action_codes() {
        assert_eq!(Action::from_code(0), Action::Down);
        assert_eq!(Action::from_code(1), Action::Up);
        assert_eq!(Action::from_code(2), Action::Idle);
        assert_eq!(Action::from_code(-1), Action::Idle);
    }

    #[test]
    fn test_paddle_delta() {
        assert_eq!(Action::Up.paddle_delta(4), -4);
        assert_eq!(Action::Down.paddle_delta(4), 4);
        assert_eq!(Action::Idle.paddle_delta(4), 0);
    }

    #[test]
    fn test_capture() {
        let mut episode = Episode::new(1, 0);
        episode.ball = Ball::at(490, 340, IVec2::new(1, 1), 1);
        episode.hits = 2;
        episode.losses = 1;

        let obs = Observation::capture(&episode, Some(Action::Up), 1);
        assert_eq!(obs.paddle_position, ARENA_HEIGHT / 2);
        assert_eq!((obs.ball_x, obs.ball_y), (500, 350));
        assert_eq!((obs.ball_end_x, obs.ball_end_y), (PATH_RIGHT, 551));
        assert_eq!(obs.score, 1);
        assert!(obs.score_increased);
        assert_eq!(obs.last_action, Some(Action::Up));

        let obs = Observation::capture(&episode, None, 2);
        assert!(!obs.score_increased);
    }

    #[test]
    fn test_tracking_controller() {
        let mut ctrl = TrackingController::new();
        assert_eq!(ctrl.control(&observation(400, 300)), Action::Up);
        assert_eq!(ctrl.control(&observation(200, 300)), Action::Down);
        assert_eq!(ctrl.control(&observation(300, 300)), Action::Idle);

        ctrl.gameover(5);
        assert_eq!(ctrl.scores(), &[5]);
    }

    #[test]
    fn test_exploring_without_exploration_tracks() {
        let mut ctrl = ExploringController::new(7, 0.0, 1.0);
        assert_eq!(ctrl.control(&observation(400, 300)), Action::Up);
        assert_eq!(ctrl.control(&observation(300, 300)), Action::Down);
    }

    #[test]
    fn test_exploring_is_seeded() {
        let obs = observation(400, 300);
        let mut a = ExploringController::new(42, 0.5, 1.0);
        let mut b = ExploringController::new(42, 0.5, 1.0);
        for _ in 0..100 {
            assert_eq!(a.control(&obs), b.control(&obs));
        }
    }

    #[test]
    fn test_exploring_decays_per_episode() {
        let mut ctrl = ExploringController::new(1, 0.8, 0.5);
        ctrl.gameover(3);
        ctrl.gameover(-2);
        assert!((ctrl.explore_rate() - 0.2).abs() < 1e-9);
        assert_eq!(ctrl.scores(), &[3, -2]);
    }
}
