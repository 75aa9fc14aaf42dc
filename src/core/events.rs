//! Application event definitions

use crate::editor::EditorEvent;
use crate::game::{GameReport, GameStats};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Thin clonable wrapper around `mpsc::UnboundedSender<AppEvent>`
///
/// Every producer (host bridge, idle timer, game-window completion callback)
/// holds one of these; the event loop owns the single receiver.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventSender {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    pub fn send(&self, event: AppEvent) -> Result<(), mpsc::error::SendError<AppEvent>> {
        self.tx.send(event)
    }
}

/// Create the application event channel
pub fn channel() -> (EventSender, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender::new(tx), rx)
}

/// Application-wide events for inter-module communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Host-supplied editor activity notification
    Editor(EditorEvent),

    /// The single-shot idle timer elapsed
    IdleElapsed { generation: u64 },

    /// The overlay reported results for a game session
    GameCompleted { session_id: Uuid, report: GameReport },

    /// The game window's completion callback fired
    GameFinished(GameStats),

    /// Host asked to flip the enabled flag
    ToggleRequested,

    /// Host stdin reached EOF; the app shuts down
    HostDisconnected,
}
