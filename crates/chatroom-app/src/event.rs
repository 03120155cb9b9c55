//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine, and [`TransportEvent`], what a driver reports
//! about the connection.
//!
//! Events originate from two distinct sources:
//! - Terminal interactions (resize) and system ticks.
//! - Server payloads decoded by the [`crate::Bridge`] and connection changes.

use chatroom_proto::ChatEvent;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection in progress.
    Connecting,

    /// Connected to server.
    Connected,

    /// Server closed the connection.
    Disconnected,

    /// Connection could not be established or failed.
    TransportFailed {
        /// Error description.
        message: String,
    },

    /// A decoded server payload.
    Chat(ChatEvent),

    /// Local error not tied to the connection.
    Error {
        /// Error description.
        message: String,
    },
}

/// What a driver observed on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text payload arrived.
    Text(String),
    /// The connection closed.
    Closed,
    /// The connection failed.
    Error(String),
}
