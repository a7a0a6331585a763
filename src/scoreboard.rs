//! Statistics panel contents
//!
//! Derived from an episode's counters each frame; never stored.

use serde::{Deserialize, Serialize};

use crate::sim::Episode;

/// Per-episode statistics for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub iteration: u64,
    /// Player returns
    pub hits: u64,
    /// Times the player scored
    pub wins: u32,
    /// Times the player was scored on
    pub losses: u32,
    pub hits_per_lost_point: f64,
}

impl Scoreboard {
    pub fn new(iteration: u64, hits: u64, wins: u32, losses: u32) -> Self {
        Self {
            iteration,
            hits,
            wins,
            losses,
            hits_per_lost_point: hits_per_lost_point(hits, losses),
        }
    }

    pub fn from_episode(episode: &Episode) -> Self {
        Self::new(episode.iteration, episode.hits, episode.wins, episode.losses)
    }

    /// Panel lines, top to bottom
    pub fn lines(&self) -> [String; 5] {
        [
            format!("Iteration: {}", self.iteration),
            format!("Hits: {}", self.hits),
            format!("Times Scored: {}", self.wins),
            format!("Times Scored on: {}", self.losses),
            format!("Hits per Lost Point: {:.2}", self.hits_per_lost_point),
        ]
    }
}

/// Returns per point conceded; with no points conceded, the raw hit count
pub fn hits_per_lost_point(hits: u64, losses: u32) -> f64 {
    if hits > 0 && losses > 0 {
        hits as f64 / losses as f64
    } else {
        hits as f64
    }
}
