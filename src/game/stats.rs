//! Session statistics persistence
//!
//! Completed sessions are appended to a JSON history file in the platform
//! data directory, pruned to the most recent entries.

use crate::game::GameStats;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Maximum history entries kept on disk
const MAX_HISTORY: usize = 500;

/// Appends completed game sessions to the history file
pub struct StatsRecorder {
    path: PathBuf,
}

impl StatsRecorder {
    /// Recorder writing to the default platform data directory
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "aimbreak", "AimBreak")
            .context("Failed to determine data directory")?;
        Ok(Self {
            path: proj_dirs.data_dir().join("stats.json"),
        })
    }

    /// Recorder writing to an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one session to the history file
    pub fn save(&self, stats: &GameStats) -> Result<()> {
        let mut history = self.load_history()?;
        history.push(stats.clone());
        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }

        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create stats directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(&history).context("Failed to serialize stats history")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write stats file: {:?}", self.path))?;

        debug!(
            "Recorded game session {} ({} entries in history)",
            stats.session_id,
            history.len()
        );
        Ok(())
    }

    /// Load the session history; a missing file is an empty history
    pub fn load_history(&self) -> Result<Vec<GameStats>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read stats file: {:?}", self.path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse stats file: {:?}", self.path))
    }
}
