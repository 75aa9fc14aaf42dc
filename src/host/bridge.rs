//! Stdio bridge to the editor extension
//!
//! Reads newline-delimited JSON from stdin on a blocking thread, publishes
//! activity notifications on the multicaster, and forwards everything else as
//! application events. Outbound overlay commands go to stdout, one JSON line
//! per message.

use crate::core::events::{AppEvent, EventSender};
use crate::core::state::SharedState;
use crate::editor::{ActivityMulticaster, EditorEvent};
use crate::host::protocol::{IncomingMessage, OutgoingMessage};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

/// Clonable writer handle for overlay commands
#[derive(Clone)]
pub struct OverlaySender {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OverlaySender {
    /// Wrap an arbitrary writer (tests pass a shared buffer)
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// The production sender, writing to stdout
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Serialize and write one message, flushing so the editor sees it immediately
    pub fn send(&self, message: &OutgoingMessage) -> Result<()> {
        let json =
            serde_json::to_string(message).context("Failed to serialize overlay message")?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json).context("Failed to write overlay message")?;
        writer.flush().context("Failed to flush overlay message")?;
        Ok(())
    }
}

/// Reader half of the host connection
pub struct HostBridge {
    /// Reader thread handle (exits on stdin EOF)
    #[allow(dead_code)]
    reader: thread::JoinHandle<()>,
}

impl HostBridge {
    /// Spawn the stdin reader thread
    pub fn spawn(
        multicaster: ActivityMulticaster,
        event_tx: EventSender,
        state: SharedState,
        overlay: OverlaySender,
    ) -> Self {
        let reader = thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        handle_line(line, &multicaster, &event_tx, &state, &overlay);
                    }
                    Err(e) => {
                        warn!("Host input error: {}", e);
                        break;
                    }
                }
            }

            info!("Host input closed");
            if let Err(e) = event_tx.send(AppEvent::HostDisconnected) {
                error!("Failed to send disconnect event: {}", e);
            }
        });

        Self { reader }
    }
}

/// Dispatch one incoming line; malformed messages are logged and skipped
fn handle_line(
    line: &str,
    multicaster: &ActivityMulticaster,
    event_tx: &EventSender,
    state: &SharedState,
    overlay: &OverlaySender,
) {
    let message: IncomingMessage = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(e) => {
            warn!("Ignoring malformed host message: {}", e);
            return;
        }
    };

    match message {
        IncomingMessage::DocumentChanged { path } => {
            multicaster.publish(&EditorEvent::DocumentChanged { path });
        }
        IncomingMessage::FileOpened { path } => {
            multicaster.publish(&EditorEvent::FileOpened { path });
        }
        IncomingMessage::SelectionChanged { path } => {
            multicaster.publish(&EditorEvent::SelectionChanged { path });
        }
        IncomingMessage::GameCompleted { session_id, report } => {
            debug!("Game completed for session {}", session_id);
            if let Err(e) = event_tx.send(AppEvent::GameCompleted { session_id, report }) {
                error!("Failed to forward game completion: {}", e);
            }
        }
        IncomingMessage::ToggleExtension => {
            if let Err(e) = event_tx.send(AppEvent::ToggleRequested) {
                error!("Failed to forward toggle request: {}", e);
            }
        }
        IncomingMessage::RequestState => {
            let snapshot = state.read().clone();
            let reply = OutgoingMessage::State {
                extension_enabled: snapshot.extension_enabled,
                game_active: snapshot.game_active,
                sessions_completed: snapshot.sessions_completed,
            };
            if let Err(e) = overlay.send(&reply) {
                warn!("Failed to send state reply: {}", e);
            }
        }
    }
}
