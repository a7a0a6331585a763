//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer pixel positions, one step per tick
//! - Fixed outcome priority within a tick
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod path;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::Axis;
pub use path::{Segment, Terminal, TrajectoryNode};
pub use rect::Rect;
pub use state::{Ball, Paddle, PaddleKind};
pub use tick::{Episode, Outcome};
