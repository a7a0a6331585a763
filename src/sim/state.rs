//! Ball and paddle entities
//!
//! Positions are whole pixels. The ball moves along one of the four
//! diagonals at a fixed speed; only the signs of its direction ever change.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Axis;
use super::rect::Rect;
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Square bounding box, side = wall thickness
    pub rect: Rect,
    /// Direction per axis, each component is -1 or +1
    pub dir: IVec2,
    /// Pixels per tick along each axis
    pub speed: i32,
}

impl Ball {
    /// Ball centered in the arena, heading up and toward the AI side
    pub fn new(speed: i32) -> Self {
        let x = ARENA_WIDTH / 2 - LINE_THICKNESS / 2;
        let y = ARENA_HEIGHT / 2 - LINE_THICKNESS / 2;
        Self {
            rect: Rect::new(x, y, LINE_THICKNESS, LINE_THICKNESS),
            dir: IVec2::new(-1, -1),
            speed,
        }
    }

    /// Ball with an explicit top-left position and direction
    pub fn at(x: i32, y: i32, dir: IVec2, speed: i32) -> Self {
        debug_assert!(dir.x.abs() == 1 && dir.y.abs() == 1);
        Self {
            rect: Rect::new(x, y, LINE_THICKNESS, LINE_THICKNESS),
            dir,
            speed,
        }
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.rect.center()
    }

    /// Move one tick along the current direction. Collisions are not resolved.
    pub fn advance(&mut self) {
        self.rect.pos += self.dir * self.speed;
    }

    /// Move one tick, then bounce off ceiling/floor, then off the side walls
    pub fn step(&mut self) {
        self.advance();

        if self.hit_ceiling() || self.hit_floor() {
            self.bounce(Axis::Y);
        }
        if self.hit_wall() {
            self.bounce(Axis::X);
        }
    }
}

/// How a paddle decides its movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleKind {
    /// Moved by a human or an external controller
    Manual,
    /// Follows the ball while it approaches
    AutoTracking,
}

/// A paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Pixels per move
    pub speed: i32,
    pub kind: PaddleKind,
}

impl Paddle {
    /// Vertically centered paddle at a fixed x
    pub fn new(x: i32, speed: i32, kind: PaddleKind) -> Self {
        let y = ARENA_HEIGHT / 2 - PADDLE_HEIGHT / 2;
        Self {
            rect: Rect::new(x, y, LINE_THICKNESS, PADDLE_HEIGHT),
            speed,
            kind,
        }
    }

    /// Right-hand paddle, driven from outside the simulation
    pub fn player(speed: i32) -> Self {
        Self::new(
            ARENA_WIDTH - LINE_THICKNESS - PADDLE_INSET,
            speed,
            PaddleKind::Manual,
        )
    }

    /// Left-hand paddle, tracks the ball on its own
    pub fn ai(speed: i32) -> Self {
        Self::new(PADDLE_INSET, speed, PaddleKind::AutoTracking)
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.rect.center().y
    }

    /// Shift vertically by `delta` and keep the paddle inside the walls
    pub fn move_by(&mut self, delta: i32) {
        self.rect.pos.y += delta;
        self.clamp();
    }

    /// One tracking move toward the ball's center.
    ///
    /// Only acts while the ball heads toward the left side. There is no
    /// dead zone: when centers line up the paddle steps up, so it jitters
    /// by one speed step around the ball.
    pub fn track(&mut self, ball: &Ball) {
        if self.kind != PaddleKind::AutoTracking || ball.dir.x != -1 {
            return;
        }
        if self.center_y() < ball.center().y {
            self.move_by(self.speed);
        } else {
            self.move_by(-self.speed);
        }
    }

    fn clamp(&mut self) {
        let wall = self.rect.size.x;
        if self.rect.bottom() > ARENA_HEIGHT - wall {
            self.rect.set_bottom(ARENA_HEIGHT - wall);
        } else if self.rect.top() < wall {
            self.rect.set_top(wall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_spawns_centered() {
        let ball = Ball::new(1);
        assert_eq!(ball.center(), IVec2::new(ARENA_WIDTH / 2, ARENA_HEIGHT / 2));
        assert_eq!(ball.dir, IVec2::new(-1, -1));
    }

    #[test]
    fn test_advance_moves_diagonally_by_speed() {
        let mut ball = Ball::at(100, 100, IVec2::new(1, -1), 5);
        ball.advance();
        assert_eq!(ball.rect.pos, IVec2::new(105, 95));
        assert_eq!(ball.dir, IVec2::new(1, -1));
    }

    #[test]
    fn test_zero_speed_ball_stays_put() {
        let mut ball = Ball::at(300, 300, IVec2::new(1, 1), 0);
        ball.step();
        assert_eq!(ball.rect.pos, IVec2::new(300, 300));
    }

    #[test]
    fn test_paddle_positions() {
        let player = Paddle::player(1);
        let ai = Paddle::ai(1);
        assert_eq!(player.rect.left(), ARENA_WIDTH - LINE_THICKNESS - PADDLE_INSET);
        assert_eq!(ai.rect.left(), PADDLE_INSET);
        assert_eq!(player.rect.top(), 300);
        assert_eq!(player.center_y(), ARENA_HEIGHT / 2);
    }

    #[test]
    fn test_paddle_clamps_to_walls() {
        let mut paddle = Paddle::player(5);
        paddle.move_by(-10_000);
        assert_eq!(paddle.rect.top(), LINE_THICKNESS);

        paddle.move_by(10_000);
        assert_eq!(paddle.rect.bottom(), ARENA_HEIGHT - LINE_THICKNESS);
    }

    #[test]
    fn test_tracking_moves_toward_ball() {
        let mut ai = Paddle::ai(3);
        assert_eq!(ai.rect.top(), 300);

        // Ball center at y = 500, heading left
        let ball = Ball::at(400, 490, IVec2::new(-1, 1), 3);
        ai.track(&ball);
        assert_eq!(ai.rect.top(), 303);

        let ball = Ball::at(400, 90, IVec2::new(-1, 1), 3);
        ai.track(&ball);
        assert_eq!(ai.rect.top(), 300);
    }

    #[test]
    fn test_tracking_ignores_receding_ball() {
        let mut ai = Paddle::ai(3);
        let ball = Ball::at(400, 490, IVec2::new(1, 1), 3);
        ai.track(&ball);
        assert_eq!(ai.rect.top(), 300);
    }

    #[test]
    fn test_tracking_jitters_when_aligned() {
        let mut ai = Paddle::ai(2);
        // Centers equal: steps up, then sits above the ball and steps back down
        let ball = Ball::at(400, ai.center_y() - LINE_THICKNESS / 2, IVec2::new(-1, 1), 2);
        ai.track(&ball);
        assert_eq!(ai.rect.top(), 298);
        ai.track(&ball);
        assert_eq!(ai.rect.top(), 300);
    }

    #[test]
    fn test_manual_paddle_does_not_track() {
        let mut player = Paddle::player(3);
        let ball = Ball::at(400, 490, IVec2::new(-1, 1), 3);
        player.track(&ball);
        assert_eq!(player.rect.top(), 300);
    }
}
