//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use chatroom_proto::Request;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Connect to server.
    Connect {
        /// WebSocket URL.
        server_addr: String,
    },

    /// Write a request to the server.
    Send(Request),
}

impl AppAction {
    /// The request carried by a [`AppAction::Send`].
    pub fn request(&self) -> Option<&Request> {
        match self {
            Self::Send(request) => Some(request),
            _ => None,
        }
    }
}
