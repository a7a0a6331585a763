//! Simulation settings
//!
//! Every change goes through a setter that range-checks the value. Values
//! out of range are dropped and the previous value is kept; nothing is
//! reported to the caller beyond the returned flag.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Speed change per button press
pub const SPEED_STEP: i64 = 1;
/// FPS change per button press
pub const FPS_STEP: i64 = 50;

/// Adjustments the settings bar can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsCommand {
    SpeedDown,
    SpeedUp,
    FpsDown,
    FpsUp,
    ToggleControl,
    ToggleLines,
    ToggleStats,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Target frames (ticks) per second, in (0, 1500]
    fps: u32,
    /// Draw the predicted ball path
    lines: bool,
    /// Ball and paddle speed in pixels per tick, in [0, 15]
    speed: i32,
    /// A human drives the player paddle instead of the controller
    user_controlled: bool,
    /// Show the statistics panel
    show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            lines: false,
            speed: DEFAULT_SPEED,
            user_controlled: true,
            show_stats: false,
        }
    }
}

/// On-disk form; numbers are wide so bad values can be seen and rejected
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    fps: Option<i64>,
    lines: Option<bool>,
    speed: Option<i64>,
    user_controlled: Option<bool>,
    show_stats: Option<bool>,
}

impl Settings {
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn lines(&self) -> bool {
        self.lines
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn user_controlled(&self) -> bool {
        self.user_controlled
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    /// Set the frame rate. Returns false (and keeps the old value) when out of range.
    pub fn set_fps(&mut self, fps: i64) -> bool {
        if fps > MIN_FPS as i64 && fps <= MAX_FPS as i64 {
            self.fps = fps as u32;
            true
        } else {
            log::debug!("Ignoring fps {} (current {})", fps, self.fps);
            false
        }
    }

    /// Set the entity speed. Returns false (and keeps the old value) when out of range.
    pub fn set_speed(&mut self, speed: i64) -> bool {
        if speed >= MIN_SPEED as i64 && speed <= MAX_SPEED as i64 {
            self.speed = speed as i32;
            true
        } else {
            log::debug!("Ignoring speed {} (current {})", speed, self.speed);
            false
        }
    }

    pub fn set_lines(&mut self, lines: bool) {
        self.lines = lines;
    }

    pub fn set_user_controlled(&mut self, user_controlled: bool) {
        self.user_controlled = user_controlled;
    }

    pub fn set_show_stats(&mut self, show_stats: bool) {
        self.show_stats = show_stats;
    }

    /// Apply a settings-bar command. Returns true if anything changed.
    pub fn apply(&mut self, command: SettingsCommand) -> bool {
        match command {
            SettingsCommand::SpeedDown => self.set_speed(self.speed as i64 - SPEED_STEP),
            SettingsCommand::SpeedUp => self.set_speed(self.speed as i64 + SPEED_STEP),
            SettingsCommand::FpsDown => self.set_fps(self.fps as i64 - FPS_STEP),
            SettingsCommand::FpsUp => self.set_fps(self.fps as i64 + FPS_STEP),
            SettingsCommand::ToggleControl => {
                self.user_controlled = !self.user_controlled;
                true
            }
            SettingsCommand::ToggleLines => {
                self.lines = !self.lines;
                true
            }
            SettingsCommand::ToggleStats => {
                self.show_stats = !self.show_stats;
                true
            }
        }
    }

    /// Parse settings JSON. Missing keys keep their defaults and
    /// out-of-range numbers are dropped the same way the setters drop them.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: SettingsFile = serde_json::from_str(json)?;
        let mut settings = Self::default();
        if let Some(fps) = file.fps {
            settings.set_fps(fps);
        }
        if let Some(speed) = file.speed {
            settings.set_speed(speed);
        }
        if let Some(lines) = file.lines {
            settings.lines = lines;
        }
        if let Some(user_controlled) = file.user_controlled {
            settings.user_controlled = user_controlled;
        }
        if let Some(show_stats) = file.show_stats {
            settings.show_stats = show_stats;
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to a file
    pub fn save(&self, path: &Path) {
        match self.to_json() {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}
