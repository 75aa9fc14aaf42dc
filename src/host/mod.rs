//! Stdio host connection: wire protocol, reader bridge, overlay writer

pub mod bridge;
pub mod protocol;

pub use bridge::{HostBridge, OverlaySender};
pub use protocol::{IncomingMessage, OutgoingMessage};
