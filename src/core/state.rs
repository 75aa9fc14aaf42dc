//! Application state management

use crate::core::settings::Settings;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the application state
pub type SharedState = Arc<RwLock<AppState>>;

/// Observable application state
///
/// Written by the idle controller on the event-loop task; read by the host
/// bridge when the editor asks for a state snapshot.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether idle detection is currently enabled
    pub extension_enabled: bool,
    /// Whether a game session is in progress
    pub game_active: bool,
    /// Game sessions completed since startup
    pub sessions_completed: u64,
}

impl AppState {
    /// Initial state derived from the loaded settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            extension_enabled: settings.enable_extension,
            game_active: false,
            sessions_completed: 0,
        }
    }

    /// Wrap an initial state in the shared handle
    pub fn shared(settings: &Settings) -> SharedState {
        Arc::new(RwLock::new(Self::new(settings)))
    }
}
