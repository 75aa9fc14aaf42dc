//! Wire protocol for the editor host bridge
//!
//! Messages travel as newline-delimited JSON over stdio. The editor extension
//! sends activity notifications and game results; the companion replies with
//! overlay commands and state snapshots.

use crate::game::{GameMode, GameReport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Message received from the editor extension
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IncomingMessage {
    /// An edit in any open document
    DocumentChanged {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// A file was opened in an editor
    FileOpened { path: PathBuf },
    /// The active editor selection changed
    SelectionChanged {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// The overlay finished (or the user abandoned) a game session
    #[serde(rename_all = "camelCase")]
    GameCompleted {
        session_id: Uuid,
        #[serde(default)]
        report: GameReport,
    },
    /// Flip the enabled flag
    ToggleExtension,
    /// Ask for a state snapshot reply
    RequestState,
}

/// Message sent to the editor extension
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutgoingMessage {
    /// Open the game overlay for a new session
    #[serde(rename_all = "camelCase")]
    ShowGame {
        session_id: Uuid,
        mode: GameMode,
        stats_enabled: bool,
    },
    /// Tear down the overlay for a session
    #[serde(rename_all = "camelCase")]
    DisposeGame { session_id: Uuid },
    /// State snapshot reply to `requestState`
    #[serde(rename_all = "camelCase")]
    State {
        extension_enabled: bool,
        game_active: bool,
        sessions_completed: u64,
    },
}
