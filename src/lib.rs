//! AimBreak editor companion
//!
//! A Rust companion process that nudges developers toward micro-breaks: the
//! editor extension pipes activity notifications over stdio, and after a
//! configured quiet period the companion launches an aim-trainer game in the
//! editor overlay.
//!
//! # Features
//! - Debounces document-change, file-open, and selection-change notifications
//!   into a single idle timer
//! - Starts one game session per quiet period; sessions never overlap
//! - Records per-session statistics to a JSON history file
//! - Toggleable at runtime without interrupting an in-progress game
//! - Newline-delimited JSON protocol over stdin/stdout

pub mod core;
pub mod editor;
pub mod game;
pub mod host;
pub mod idle;

pub use core::events::{AppEvent, EventSender};
pub use core::settings::Settings;
pub use core::state::{AppState, SharedState};
pub use editor::{ActivityMulticaster, EditorEvent};
pub use game::{GameMode, GameReport, GameStats, GameWindow, StatsRecorder};
pub use host::{HostBridge, OverlaySender};
pub use idle::IdleController;
