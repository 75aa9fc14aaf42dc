//! Single-shot idle countdown

use crate::core::events::{AppEvent, EventSender};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Single-shot countdown reporting expiry on the event channel
///
/// Re-arming restarts the countdown from the full duration. Aborting the
/// countdown task is not synchronous with the event loop, so a cancelled
/// countdown can still have an expiry event in flight; every arm bumps the
/// generation and consumers drop events whose generation is stale.
pub struct IdleTimer {
    event_tx: EventSender,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl IdleTimer {
    pub fn new(event_tx: EventSender) -> Self {
        Self {
            event_tx,
            handle: None,
            generation: 0,
        }
    }

    /// Start (or restart) the countdown
    pub fn arm(&mut self, duration: Duration) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let event_tx = self.event_tx.clone();

        debug!(
            "Arming idle timer for {:?} (generation {})",
            duration, generation
        );
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Err(e) = event_tx.send(AppEvent::IdleElapsed { generation }) {
                error!("Failed to send idle expiry: {}", e);
            }
        }));
    }

    /// Stop the pending countdown, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a countdown is pending (an expired one no longer is)
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Whether an expiry event with this generation is still live
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
