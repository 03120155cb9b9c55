//! Local user identity.
//!
//! The server confirms who we are with a welcome line after login. Until then
//! nothing is attributed to the local user.

use chatroom_proto::ChatLine;

/// Remembers the asserted local identity and answers authorship questions.
#[derive(Debug, Clone, Default)]
pub struct IdentityTracker {
    username: Option<String>,
}

impl IdentityTracker {
    /// Tracker with no asserted identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the confirmed identity. Last assertion wins.
    pub fn assert_identity(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    /// Confirmed username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether `author` is the local user.
    pub fn is_self(&self, author: &str) -> bool {
        self.username.as_deref() == Some(author)
    }

    /// Whether a decoded line was written by the local user.
    ///
    /// Lines whose author could not be extracted are never self-authored.
    pub fn authored(&self, line: &ChatLine) -> bool {
        line.author.as_deref().is_some_and(|author| self.is_self(author))
    }
}

#[cfg(test)]
mod tests {
    use chatroom_proto::decode;

    use super::*;

    fn live_line(payload: &str) -> ChatLine {
        match decode(payload).event {
            chatroom_proto::ChatEvent::LiveLine(line) => line,
            other => panic!("expected live line, got {other:?}"),
        }
    }

    #[test]
    fn nothing_is_self_before_assertion() {
        let identity = IdentityTracker::new();
        assert!(!identity.is_self("alice"));
        assert!(!identity.authored(&live_line("[12:00] alice: hi")));
    }

    #[test]
    fn every_template_resolves_to_the_same_identity() {
        let mut identity = IdentityTracker::new();
        identity.assert_identity("alice");

        assert!(identity.authored(&live_line("[12:00] alice: hi")));
        assert!(identity.authored(&live_line("[2024-05-01 12:00:00] alice : hi")));
        assert!(identity.authored(&live_line("[2024-05-01 12:00:00] alice (私) 对 bob 说: hi")));
        assert!(!identity.authored(&live_line("[2024-05-01 12:00:00] bob (私) 对 alice 说: hi")));
    }

    #[test]
    fn last_assertion_wins() {
        let mut identity = IdentityTracker::new();
        identity.assert_identity("alice");
        identity.assert_identity("bob");

        assert_eq!(identity.username(), Some("bob"));
        assert!(!identity.is_self("alice"));
    }

    #[test]
    fn prefix_of_identity_is_not_self() {
        let mut identity = IdentityTracker::new();
        identity.assert_identity("alice");
        assert!(!identity.authored(&live_line("[12:00] alic: hi")));
        assert!(!identity.authored(&live_line("[12:00] alice2: hi")));
    }
}
