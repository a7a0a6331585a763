//! Episode state and the per-tick update
//!
//! One `update` call is one frame: the ball moves and bounces off the walls,
//! the AI paddle takes its tracking step, then at most one paddle hit or
//! pass is applied. The checks run in a fixed order and the first match
//! wins, so a ball overlapping the AI paddle while also past the player's
//! wall only counts as an AI return.

use serde::{Deserialize, Serialize};

use super::collision::Axis;
use super::path::TrajectoryNode;
use super::state::{Ball, Paddle};
use crate::consts::*;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// AI paddle returned the ball
    AiReturn,
    /// Player paddle returned the ball
    PlayerReturn,
    /// Ball got past the AI; player scores
    PlayerScored,
    /// Ball got past the player; AI scores
    AiScored,
}

/// One match: a ball, two paddles and the running tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub ball: Ball,
    pub player: Paddle,
    pub ai: Paddle,
    /// Player paddle returns
    pub hits: u64,
    /// Rallies won by the player
    pub wins: u32,
    /// Rallies won by the AI
    pub losses: u32,
    /// Episode index, for logging
    pub iteration: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Episode {
    /// Fresh match with every entity moving at `speed`
    pub fn new(speed: i32, iteration: u64) -> Self {
        Self {
            ball: Ball::new(speed),
            player: Paddle::player(speed),
            ai: Paddle::ai(speed),
            hits: 0,
            wins: 0,
            losses: 0,
            iteration,
            time_ticks: 0,
        }
    }

    /// Current entity speed (ball and paddles always share it)
    pub fn speed(&self) -> i32 {
        self.ball.speed
    }

    /// Apply a speed to the ball and both paddles
    pub fn set_speed(&mut self, speed: i32) {
        self.ball.speed = speed;
        self.player.speed = speed;
        self.ai.speed = speed;
    }

    /// Advance one tick
    pub fn update(&mut self) -> Option<Outcome> {
        self.time_ticks += 1;

        self.ball.step();
        self.ai.track(&self.ball);

        let outcome = if self.ball.hit_paddle(&self.ai) {
            self.ball.bounce(Axis::X);
            Outcome::AiReturn
        } else if self.ball.hit_paddle(&self.player) {
            self.ball.bounce(Axis::X);
            self.hits += 1;
            Outcome::PlayerReturn
        } else if self.ball.pass_computer() {
            self.wins += 1;
            Outcome::PlayerScored
        } else if self.ball.pass_player() {
            self.losses += 1;
            Outcome::AiScored
        } else {
            return None;
        };

        if matches!(outcome, Outcome::PlayerScored | Outcome::AiScored) {
            log::debug!(
                "Episode {}: {:?} (wins {}, losses {})",
                self.iteration,
                outcome,
                self.wins,
                self.losses
            );
        }

        Some(outcome)
    }

    /// Either side reached the win threshold, or the hit cap was reached
    pub fn is_over(&self) -> bool {
        self.wins >= WIN_THRESHOLD || self.losses >= WIN_THRESHOLD || self.hits >= HIT_CAP
    }

    /// Score reported to a controller: returns and wins count up, losses down
    pub fn score(&self) -> i64 {
        self.hits as i64 + self.wins as i64 - self.losses as i64
    }

    /// Fresh prediction of where the ball is heading
    pub fn trajectory(&self) -> TrajectoryNode {
        TrajectoryNode::from_ball(&self.ball)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rect;
    use glam::IVec2;

    #[test]
    fn test_new_episode() {
        let episode = Episode::new(3, 4);
        assert_eq!(episode.speed(), 3);
        assert_eq!(episode.player.speed, 3);
        assert_eq!(episode.ai.speed, 3);
        assert_eq!(episode.iteration, 4);
        assert_eq!(episode.score(), 0);
        assert!(!episode.is_over());
    }

    #[test]
    fn test_set_speed_applies_to_all() {
        let mut episode = Episode::new(1, 0);
        episode.set_speed(9);
        assert_eq!(episode.ball.speed, 9);
        assert_eq!(episode.player.speed, 9);
        assert_eq!(episode.ai.speed, 9);
    }

    #[test]
    fn test_quiet_tick() {
        let mut episode = Episode::new(1, 0);
        assert_eq!(episode.update(), None);
        assert_eq!(episode.ball.rect.pos, IVec2::new(489, 339));
        // Ball heads left, so the AI paddle tracks (up, its center is below)
        assert_eq!(episode.ai.rect.top(), 299);
        assert_eq!(episode.time_ticks, 1);
    }

    #[test]
    fn test_ai_hit_beats_player_pass() {
        let mut episode = Episode::new(0, 0);
        // Contrived overlap: ball touches the right wall and the AI paddle at once
        episode.ball.rect.pos = IVec2::new(ARENA_WIDTH - LINE_THICKNESS * 2, 320);
        episode.ai.rect = Rect::new(ARENA_WIDTH - LINE_THICKNESS * 2, 300, LINE_THICKNESS, PADDLE_HEIGHT);

        assert!(episode.ball.hit_paddle(&episode.ai));
        let dir_before = episode.ball.dir;

        assert_eq!(episode.update(), Some(Outcome::AiReturn));
        assert_eq!(episode.ball.dir.x, -dir_before.x);
        assert_eq!(episode.losses, 0);
        assert_eq!(episode.hits, 0);
    }

    #[test]
    fn test_player_return_counts_hit() {
        let mut episode = Episode::new(1, 0);
        let left = episode.player.rect.left();
        episode.ball = Ball::at(left - LINE_THICKNESS, 330, IVec2::new(1, 1), 1);

        assert_eq!(episode.update(), Some(Outcome::PlayerReturn));
        assert_eq!(episode.hits, 1);
        assert_eq!(episode.ball.dir.x, -1);
        assert_eq!(episode.score(), 1);
    }

    #[test]
    fn test_player_scores_past_ai() {
        let mut episode = Episode::new(1, 0);
        // Low in the court so the AI paddle cannot reach it this tick
        episode.ball = Ball::at(LINE_THICKNESS + 1, 600, IVec2::new(-1, 1), 1);

        assert_eq!(episode.update(), Some(Outcome::PlayerScored));
        assert_eq!(episode.wins, 1);
        assert_eq!(episode.ball.rect.pos, IVec2::new(ARENA_WIDTH / 2, ARENA_HEIGHT / 2));
        // Bounced off the wall before the serve, so it heads to the player
        assert_eq!(episode.ball.dir.x, 1);
    }

    #[test]
    fn test_ai_scores_past_player() {
        let mut episode = Episode::new(1, 0);
        episode.ball = Ball::at(ARENA_WIDTH - LINE_THICKNESS * 2 - 1, 100, IVec2::new(1, 1), 1);

        assert_eq!(episode.update(), Some(Outcome::AiScored));
        assert_eq!(episode.losses, 1);
        assert_eq!(episode.score(), -1);
    }

    #[test]
    fn test_seventh_win_ends_episode() {
        let mut episode = Episode::new(1, 0);
        episode.wins = WIN_THRESHOLD - 1;
        episode.hits = 12;
        episode.losses = 2;
        episode.ball = Ball::at(LINE_THICKNESS + 1, 600, IVec2::new(-1, 1), 1);

        assert!(!episode.is_over());
        assert_eq!(episode.update(), Some(Outcome::PlayerScored));
        assert_eq!(episode.wins, WIN_THRESHOLD);
        assert!(episode.is_over());
        assert_eq!(episode.score(), 12 + 7 - 2);
    }

    #[test]
    fn test_hit_cap_ends_episode() {
        let mut episode = Episode::new(1, 0);
        episode.hits = HIT_CAP;
        assert!(episode.is_over());
    }

    #[test]
    fn test_determinism() {
        let mut a = Episode::new(5, 0);
        let mut b = Episode::new(5, 0);
        for _ in 0..5000 {
            let oa = a.update();
            let ob = b.update();
            assert_eq!(oa, ob);
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.ai, b.ai);
        assert_eq!((a.hits, a.wins, a.losses), (b.hits, b.wins, b.losses));
    }

    #[test]
    fn test_trajectory_tracks_ball() {
        let episode = Episode::new(1, 0);
        let path = episode.trajectory();
        assert_eq!(path.start, episode.ball.center());
        assert_eq!(path.dir, episode.ball.dir);
    }
}
