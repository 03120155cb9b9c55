//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] sits between the transport and the [`crate::App`]. It is the
//! only place where payload text is decoded or encoded.
//!
//! # Responsibilities
//!
//! - Decodes inbound payloads into [`crate::AppEvent`]s, identity assertion
//!   first.
//! - Encodes [`crate::AppAction::Send`] requests and accumulates the resulting
//!   text to be written by the driver in the next I/O cycle.
//! - Translates connection changes reported by the driver.

use chatroom_proto::decode;

use crate::{AppAction, AppEvent, TransportEvent};

/// Bridge between App and the wire protocol.
#[derive(Debug, Default)]
pub struct Bridge {
    outgoing: Vec<String>,
}

impl Bridge {
    /// Create a new Bridge with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::Send(request) => match request.encode() {
                Ok(text) => {
                    if request.is_sensitive() {
                        tracing::debug!("Queued credentials");
                    } else {
                        tracing::debug!(%text, "Queued request");
                    }
                    self.outgoing.push(text);
                    vec![]
                },
                Err(e) => {
                    tracing::error!("Failed to encode request: {:?}", e);
                    vec![AppEvent::Error { message: e.to_string() }]
                },
            },
            AppAction::Render | AppAction::Quit | AppAction::Connect { .. } => vec![],
        }
    }

    /// Handle a payload from the server.
    pub fn handle_payload(&self, payload: &str) -> Vec<AppEvent> {
        let decoded = decode(payload);
        tracing::trace!(event = ?decoded.event, "Decoded payload");
        decoded.into_events().into_iter().map(AppEvent::Chat).collect()
    }

    /// Handle anything the driver observed on the connection.
    pub fn handle_transport(&self, event: TransportEvent) -> Vec<AppEvent> {
        match event {
            TransportEvent::Text(payload) => self.handle_payload(&payload),
            TransportEvent::Closed => vec![AppEvent::Disconnected],
            TransportEvent::Error(message) => vec![AppEvent::TransportFailed { message }],
        }
    }

    /// Take pending outgoing payloads.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }
}

#[cfg(test)]
mod tests {
    use chatroom_proto::{ChatEvent, Request};

    use super::*;

    #[test]
    fn send_queues_encoded_text() {
        let mut bridge = Bridge::new();
        let events = bridge.process_app_action(AppAction::Send(Request::Private {
            peer: "bob".into(),
            text: "hello".into(),
        }));

        assert!(events.is_empty());
        assert_eq!(bridge.take_outgoing(), ["@bob hello"]);
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn ui_actions_queue_nothing() {
        let mut bridge = Bridge::new();
        let _ = bridge.process_app_action(AppAction::Render);
        let _ = bridge.process_app_action(AppAction::Quit);
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn welcome_line_asserts_identity_first() {
        let bridge = Bridge::new();
        let events = bridge.handle_payload("登录成功，欢迎 alice");

        assert_eq!(events[0], AppEvent::Chat(ChatEvent::IdentityAssertion {
            username: "alice".into()
        }));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn connection_changes() {
        let bridge = Bridge::new();
        assert_eq!(bridge.handle_transport(TransportEvent::Closed), [AppEvent::Disconnected]);
        assert_eq!(bridge.handle_transport(TransportEvent::Error("reset".into())), [
            AppEvent::TransportFailed { message: "reset".into() }
        ]);
    }
}
