//! Game window lifecycle
//!
//! One `GameWindow` per session, created when the idle timer fires and never
//! reused. The window is a proxy for the overlay the editor renders: `show`
//! and `dispose` become overlay commands, and the overlay's report comes back
//! through [`complete`](GameWindow::complete), which fires the completion
//! callback exactly once.

use crate::core::settings::Settings;
use crate::game::{GameMode, GameReport, GameStats};
use crate::host::bridge::OverlaySender;
use crate::host::protocol::OutgoingMessage;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Callback invoked with the session statistics when the session completes
pub type CompletionCallback = Box<dyn FnOnce(GameStats) + Send>;

/// A single game session's window
pub struct GameWindow {
    /// Session this window belongs to
    session_id: Uuid,
    /// Drill the overlay runs
    mode: GameMode,
    /// Whether the overlay should tell the user stats are being recorded
    stats_enabled: bool,
    /// Writer for overlay commands
    overlay: OverlaySender,
    /// Completion callback; taken on first completion or on dispose
    on_complete: Mutex<Option<CompletionCallback>>,
    /// Whether dispose already ran
    disposed: AtomicBool,
}

impl GameWindow {
    /// Create a window for a fresh session
    pub fn new(
        mode: GameMode,
        settings: &Settings,
        overlay: OverlaySender,
        on_complete: CompletionCallback,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            mode,
            stats_enabled: settings.enable_stats_save,
            overlay,
            on_complete: Mutex::new(Some(on_complete)),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Ask the overlay to open the game
    pub fn show(&self) {
        info!(
            "Showing {} game for session {}",
            self.mode, self.session_id
        );
        let command = OutgoingMessage::ShowGame {
            session_id: self.session_id,
            mode: self.mode,
            stats_enabled: self.stats_enabled,
        };
        if let Err(e) = self.overlay.send(&command) {
            warn!("Failed to send show command: {}", e);
        }
    }

    /// Deliver the overlay's report; the completion callback fires exactly once
    pub fn complete(&self, report: GameReport) {
        let callback = self.on_complete.lock().take();
        match callback {
            Some(callback) => {
                let stats = GameStats::from_report(self.session_id, self.mode, report);
                callback(stats);
            }
            None => {
                debug!(
                    "Ignoring completion for session {} (already completed or disposed)",
                    self.session_id
                );
            }
        }
    }

    /// Tear down the overlay; never fires the completion callback. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        // A disposed window must not complete later
        self.on_complete.lock().take();

        let command = OutgoingMessage::DisposeGame {
            session_id: self.session_id,
        };
        if let Err(e) = self.overlay.send(&command) {
            warn!("Failed to send dispose command: {}", e);
        }
    }
}

impl Drop for GameWindow {
    fn drop(&mut self) {
        self.dispose();
    }
}
