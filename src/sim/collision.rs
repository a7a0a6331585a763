//! Collision tests and bounce response for the ball
//!
//! Wall tests look at the ball's leading edge and also require the ball to
//! be heading into the wall, so a ball that has just bounced never triggers
//! the same wall again while it is still overlapping the margin. Bounces
//! flip a direction sign and leave the position alone; at low speeds the
//! overshoot into the wall is a few pixels at most.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Bounce axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Ball {
    /// Leading edge reached a side wall while heading into it
    pub fn hit_wall(&self) -> bool {
        (self.dir.x == -1 && self.rect.left() <= LINE_THICKNESS)
            || (self.dir.x == 1 && self.rect.right() >= ARENA_WIDTH - LINE_THICKNESS)
    }

    /// Leading edge reached the ceiling while heading up
    pub fn hit_ceiling(&self) -> bool {
        self.dir.y == -1 && self.rect.top() <= LINE_THICKNESS
    }

    /// Leading edge reached the floor while heading down
    pub fn hit_floor(&self) -> bool {
        self.dir.y == 1 && self.rect.bottom() >= ARENA_HEIGHT - LINE_THICKNESS
    }

    /// Reverse direction along one axis
    pub fn bounce(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.dir.x = -self.dir.x,
            Axis::Y => self.dir.y = -self.dir.y,
        }
    }

    /// Bounding boxes overlap
    pub fn hit_paddle(&self, paddle: &Paddle) -> bool {
        self.rect.collides(&paddle.rect)
    }

    /// Ball got past the player paddle (right wall). Serves from the center on true.
    pub fn pass_player(&mut self) -> bool {
        if self.rect.right() >= ARENA_WIDTH - LINE_THICKNESS {
            self.serve();
            true
        } else {
            false
        }
    }

    /// Ball got past the AI paddle (left wall). Serves from the center on true.
    pub fn pass_computer(&mut self) -> bool {
        if self.rect.left() <= LINE_THICKNESS {
            self.serve();
            true
        } else {
            false
        }
    }

    /// Put the ball's top-left corner on the arena center, keeping direction
    fn serve(&mut self) {
        self.rect = Rect::new(
            ARENA_WIDTH / 2,
            ARENA_HEIGHT / 2,
            self.rect.size.x,
            self.rect.size.y,
        );
    }
}
