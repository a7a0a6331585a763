//! Ball path prediction
//!
//! The ball always travels at 45°, so its future is a lattice walk: step the
//! center point by its direction until it lands on a side line (the ball has
//! crossed the court) or on a rail line (it is about to come off the ceiling
//! or floor). A rail landing spawns a child segment with the vertical
//! direction flipped, and the chain continues until some segment lands on a
//! side line.
//!
//! ```text
//!   rail  ──────────────/\───────────────
//!                      /  \
//!   side |            /    \           | side
//!        |    start  *      \          |
//!                            \         |
//!                             *  end   |
//! ```
//!
//! Chains are rebuilt from scratch whenever they are needed; nothing is cached.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::consts::*;

/// Longest walk a single segment may take before giving up
pub const MAX_WALK_STEPS: i32 = ARENA_WIDTH + ARENA_HEIGHT;
/// Longest chain of reflections followed
pub const MAX_REFLECTIONS: usize = 64;

/// Why a segment's walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// Landed on a side line; the ball reaches the far wall here
    Side,
    /// Landed on a ceiling or floor rail line
    Rail,
    /// Never met a line within the step budget
    Exhausted,
}

/// One straight piece of a predicted path, for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: IVec2,
    pub end: IVec2,
}

/// A node in the reflection chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryNode {
    pub start: IVec2,
    pub dir: IVec2,
    /// Where this segment's walk stopped
    pub end: IVec2,
    pub terminal: Terminal,
    /// Segment after the next ceiling/floor reflection
    pub next: Option<Box<TrajectoryNode>>,
}

impl TrajectoryNode {
    /// Predict from a point and a diagonal direction
    pub fn new(start: IVec2, dir: IVec2) -> Self {
        Self::build(start, dir, 0)
    }

    /// Predict from the ball's current center and direction
    pub fn from_ball(ball: &Ball) -> Self {
        Self::new(ball.center(), ball.dir)
    }

    fn build(start: IVec2, dir: IVec2, depth: usize) -> Self {
        debug_assert!(dir.x.abs() == 1 && dir.y.abs() == 1);

        let (end, terminal) = walk(start, dir);

        let next = match terminal {
            Terminal::Rail if depth < MAX_REFLECTIONS => {
                // Restart one pixel back inside the rail, heading away from it
                let back = if end.y == PATH_TOP { 1 } else { -1 };
                let child_start = IVec2::new(end.x, end.y + back);
                let child_dir = IVec2::new(dir.x, -dir.y);
                Some(Box::new(Self::build(child_start, child_dir, depth + 1)))
            }
            _ => None,
        };

        Self {
            start,
            dir,
            end,
            terminal,
            next,
        }
    }

    /// Last node of the chain
    pub fn leaf(&self) -> &TrajectoryNode {
        let mut node = self;
        while let Some(next) = node.next.as_deref() {
            node = next;
        }
        node
    }

    /// Number of reflections in the chain
    pub fn reflections(&self) -> usize {
        self.nodes().count() - 1
    }

    /// Predicted meeting point at the far side.
    ///
    /// The leaf's end with y pulled 40 px back against its vertical travel,
    /// which lands close to where the ball crosses the paddle column. The
    /// same offset covers leaves that never reached a side line.
    pub fn absolute_end(&self) -> IVec2 {
        let leaf = self.leaf();
        let offset = if leaf.dir.y == -1 {
            SETTLE_OFFSET
        } else {
            -SETTLE_OFFSET
        };
        IVec2::new(leaf.end.x, leaf.end.y + offset)
    }

    /// Walk the chain from this node to its leaf
    pub fn nodes(&self) -> impl Iterator<Item = &TrajectoryNode> {
        std::iter::successors(Some(self), |node| node.next.as_deref())
    }

    /// Straight pieces of the chain, in travel order
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.nodes().map(|node| Segment {
            start: node.start,
            end: node.end,
        })
    }
}

/// Step diagonally until a side or rail line is hit.
///
/// Rail takes precedence when both are hit at once (a corner), so the chain
/// gets one more short segment that ends on the side line.
fn walk(start: IVec2, dir: IVec2) -> (IVec2, Terminal) {
    let on_side = |p: IVec2| p.x == PATH_LEFT || p.x == PATH_RIGHT;
    let on_rail = |p: IVec2| p.y == PATH_TOP || p.y == PATH_BOTTOM;

    let mut point = start;
    let mut steps = 0;
    while !on_side(point) && !on_rail(point) {
        if steps == MAX_WALK_STEPS {
            return (point, Terminal::Exhausted);
        }
        point += dir;
        steps += 1;
    }

    if on_rail(point) {
        (point, Terminal::Rail)
    } else {
        (point, Terminal::Side)
    }
}
