//! Editor activity events and the host-bus subscription model
//!
//! The editor owns the real notification channels (document edits, file
//! opens, selection changes). [`ActivityMulticaster`] is the callback-registry
//! end of that bus: the host bridge publishes every activity notification it
//! receives, and subscribers (the app wires exactly one, forwarding into the
//! event channel) react to them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An activity notification from the editor
///
/// All variants are debounced identically: each one restarts the idle timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
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
}

impl EditorEvent {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            EditorEvent::DocumentChanged { .. } => "documentChanged",
            EditorEvent::FileOpened { .. } => "fileOpened",
            EditorEvent::SelectionChanged { .. } => "selectionChanged",
        }
    }
}

/// Identifier handed out by [`ActivityMulticaster::subscribe`]
pub type SubscriptionId = usize;

/// Callback invoked for every published activity event
pub type ActivityListener = Box<dyn Fn(&EditorEvent) + Send>;

/// Observer registry for editor activity events
pub struct ActivityMulticaster {
    listeners: Vec<(SubscriptionId, ActivityListener)>,
    next_id: SubscriptionId,
}

impl ActivityMulticaster {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener; returns an id usable with [`unsubscribe`](Self::unsubscribe)
    pub fn subscribe(&mut self, listener: ActivityListener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every registered listener
    pub fn publish(&self, event: &EditorEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for ActivityMulticaster {
    fn default() -> Self {
        Self::new()
    }
}
