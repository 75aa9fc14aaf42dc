//! Game domain types: modes, per-session reports, and statistics

pub mod stats;
pub mod window;

pub use stats::StatsRecorder;
pub use window::GameWindow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors from game configuration
#[derive(Debug, Error)]
pub enum GameError {
    /// The configured game mode doesn't name a known drill
    #[error("unknown game mode: {0:?} (expected one of: grid, flick, tracking)")]
    UnknownMode(String),
}

/// Aim-trainer drill offered by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Static target grid, hit as many as possible
    #[default]
    Grid,
    /// Single targets at random positions, speed over precision
    Flick,
    /// One moving target, keep the cursor on it
    Tracking,
}

impl GameMode {
    /// Get the display name for this mode
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Grid => "Grid",
            GameMode::Flick => "Flick",
            GameMode::Tracking => "Tracking",
        }
    }

    /// Get all available modes
    pub fn all() -> &'static [GameMode] {
        &[GameMode::Grid, GameMode::Flick, GameMode::Tracking]
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(GameMode::Grid),
            "flick" => Ok(GameMode::Flick),
            "tracking" => Ok(GameMode::Tracking),
            _ => Err(GameError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Raw session results as reported by the overlay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    /// Targets hit during the session
    #[serde(default)]
    pub targets_hit: u32,
    /// Targets missed or expired
    #[serde(default)]
    pub targets_missed: u32,
    /// Wall-clock session length in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
    /// Whether the user closed the game before finishing the round
    #[serde(default)]
    pub abandoned: bool,
}

/// Statistics record for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStats {
    /// Session this record belongs to
    pub session_id: Uuid,
    /// Drill that was played
    pub mode: GameMode,
    /// Targets hit during the session
    pub targets_hit: u32,
    /// Targets missed or expired
    pub targets_missed: u32,
    /// Wall-clock session length in milliseconds
    pub duration_ms: u64,
    /// Whether the user closed the game before finishing the round
    pub abandoned: bool,
    /// When the session ended
    pub finished_at: DateTime<Utc>,
}

impl GameStats {
    /// Build a stats record from an overlay report
    pub fn from_report(session_id: Uuid, mode: GameMode, report: GameReport) -> Self {
        Self {
            session_id,
            mode,
            targets_hit: report.targets_hit,
            targets_missed: report.targets_missed,
            duration_ms: report.duration_ms,
            abandoned: report.abandoned,
            finished_at: Utc::now(),
        }
    }

    /// Hit ratio in [0.0, 1.0]; 0.0 when no targets were presented
    pub fn accuracy(&self) -> f32 {
        let attempts = self.targets_hit + self.targets_missed;
        if attempts == 0 {
            return 0.0;
        }
        self.targets_hit as f32 / attempts as f32
    }
}
