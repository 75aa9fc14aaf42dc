//! Application settings management
//!
//! Manages user preferences: whether idle detection is enabled, how long the
//! quiet period is, which game mode the overlay should run, and whether
//! session statistics are persisted.

use crate::game::{GameError, GameMode};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default quiet period before a game session triggers (5 minutes)
pub const DEFAULT_IDLE_TIMER_MS: u64 = 300_000;

/// Minimum idle timer
pub const MIN_IDLE_TIMER_MS: u64 = 5_000;

/// Maximum idle timer
pub const MAX_IDLE_TIMER_MS: u64 = 3_600_000;

/// Default game mode
pub const DEFAULT_GAME_MODE: &str = "grid";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether idle detection is enabled
    #[serde(default = "default_enable_extension")]
    pub enable_extension: bool,

    /// Quiet period with no editor activity before a game triggers, in milliseconds
    #[serde(default = "default_idle_timer_ms")]
    pub idle_timer_ms: u64,

    /// Game mode the overlay runs, parsed into [`GameMode`] at startup
    #[serde(default = "default_game_mode")]
    pub game_mode: String,

    /// Whether completed session statistics are written to disk
    #[serde(default = "default_enable_stats_save")]
    pub enable_stats_save: bool,
}

fn default_enable_extension() -> bool {
    true
}

fn default_idle_timer_ms() -> u64 {
    DEFAULT_IDLE_TIMER_MS
}

fn default_game_mode() -> String {
    DEFAULT_GAME_MODE.to_string()
}

fn default_enable_stats_save() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_extension: default_enable_extension(),
            idle_timer_ms: default_idle_timer_ms(),
            game_mode: default_game_mode(),
            enable_stats_save: default_enable_stats_save(),
        }
    }
}

impl Settings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file: {:?}", path))?;
            let settings: Settings = toml::from_str(&content)
                .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        Ok(())
    }

    /// Get the settings file path
    fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "aimbreak", "AimBreak")
            .context("Failed to determine settings directory")?;
        Ok(proj_dirs.config_dir().join("settings.toml"))
    }

    /// Set the idle timer with clamping to the valid range
    pub fn set_idle_timer_ms(&mut self, ms: u64) {
        self.idle_timer_ms = ms.clamp(MIN_IDLE_TIMER_MS, MAX_IDLE_TIMER_MS);
    }

    /// The configured quiet period as a [`Duration`]
    pub fn idle_duration(&self) -> Duration {
        Duration::from_millis(self.idle_timer_ms)
    }

    /// Parse the configured game mode; an unknown mode is a configuration error
    pub fn parse_game_mode(&self) -> Result<GameMode, GameError> {
        self.game_mode.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.enable_extension);
        assert_eq!(settings.idle_timer_ms, DEFAULT_IDLE_TIMER_MS);
        assert_eq!(settings.game_mode, "grid");
        assert!(settings.enable_stats_save);
        assert_eq!(settings.parse_game_mode().unwrap(), GameMode::Grid);
    }

    #[test]
    fn test_idle_timer_clamping() {
        let mut settings = Settings::default();

        settings.set_idle_timer_ms(100);
        assert_eq!(settings.idle_timer_ms, MIN_IDLE_TIMER_MS);

        settings.set_idle_timer_ms(10_000_000);
        assert_eq!(settings.idle_timer_ms, MAX_IDLE_TIMER_MS);

        settings.set_idle_timer_ms(60_000);
        assert_eq!(settings.idle_timer_ms, 60_000);
    }

    #[test]
    fn test_serialization() {
        let settings = Settings {
            enable_extension: false,
            idle_timer_ms: 120_000,
            game_mode: "tracking".to_string(),
            enable_stats_save: false,
        };

        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, settings);
        assert_eq!(parsed.parse_game_mode().unwrap(), GameMode::Tracking);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Settings = toml::from_str("idle_timer_ms = 30000\n").unwrap();
        assert!(parsed.enable_extension);
        assert_eq!(parsed.idle_timer_ms, 30_000);
        assert_eq!(parsed.game_mode, "grid");
    }

    #[test]
    fn test_unknown_game_mode_is_an_error() {
        let settings = Settings {
            game_mode: "osu".to_string(),
            ..Settings::default()
        };
        assert!(settings.parse_game_mode().is_err());
    }
}
