//! Presentation units.
//!
//! A [`PresentationUnit`] is everything a renderer needs to draw one entry of
//! the transcript: no renderer ever looks at raw server text or asks who the
//! local user is. Units are built here from decoded events and the current
//! identity, and never change once they are in the transcript.

use chatroom_proto::{ChatLine, LineScope, legacy};

use crate::IdentityTracker;

/// Notice shown when a history batch has no records.
pub const EMPTY_HISTORY_NOTICE: &str = "No message history";

/// Separator closing a reconciled history batch.
pub const HISTORY_SEPARATOR: &str = "=== End of history ===";

/// Heading shown above a group's history.
pub fn group_history_heading(group_name: &str) -> String {
    format!("=== {group_name} 群组消息历史 ===")
}

/// What a unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A chat message.
    Message,
    /// A notice from the server or the client.
    System,
    /// A divider between history and live messages.
    Separator,
}

/// Which side a unit is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Written by the local user.
    Outgoing,
    /// Written by someone else.
    Incoming,
    /// Notices and separators.
    Centered,
}

/// One fully-determined transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationUnit {
    /// Author, for messages whose author is known.
    pub author: Option<String>,
    /// Whether the local user wrote it.
    pub is_self: bool,
    /// Conversation scope.
    pub scope: LineScope,
    /// Entry kind.
    pub kind: UnitKind,
    /// Display text.
    pub text: String,
    /// Server timestamp, if known.
    pub timestamp: Option<String>,
    /// Same author and scope as the message directly before it.
    pub continues_previous: bool,
}

impl PresentationUnit {
    /// Unit for a decoded chat line.
    pub fn from_line(line: ChatLine, identity: &IdentityTracker) -> Self {
        Self {
            is_self: identity.authored(&line),
            author: line.author,
            scope: line.scope,
            kind: UnitKind::Message,
            text: line.text,
            timestamp: line.timestamp,
            continues_previous: false,
        }
    }

    /// Unit for a group message delivered as separate fields.
    pub fn group_message(
        sender: String,
        body: &str,
        timestamp: Option<String>,
        identity: &IdentityTracker,
    ) -> Self {
        Self {
            is_self: identity.is_self(&sender),
            text: legacy::group_line(timestamp.as_deref(), &sender, body),
            author: Some(sender),
            scope: LineScope::Group,
            kind: UnitKind::Message,
            timestamp,
            continues_previous: false,
        }
    }

    /// Notice unit.
    pub fn system(scope: LineScope, text: impl Into<String>) -> Self {
        Self::centered(UnitKind::System, scope, text.into())
    }

    /// Separator unit.
    pub fn separator(scope: LineScope) -> Self {
        Self::centered(UnitKind::Separator, scope, HISTORY_SEPARATOR.to_string())
    }

    fn centered(kind: UnitKind, scope: LineScope, text: String) -> Self {
        Self {
            author: None,
            is_self: false,
            scope,
            kind,
            text,
            timestamp: None,
            continues_previous: false,
        }
    }

    /// Drawing side, derived from kind and authorship.
    pub fn direction(&self) -> Direction {
        match (self.kind, self.is_self) {
            (UnitKind::Message, true) => Direction::Outgoing,
            (UnitKind::Message, false) => Direction::Incoming,
            (UnitKind::System | UnitKind::Separator, _) => Direction::Centered,
        }
    }

    /// Whether `self` would continue a run started by `previous`.
    pub(crate) fn follows(&self, previous: &Self) -> bool {
        self.kind == UnitKind::Message
            && previous.kind == UnitKind::Message
            && self.scope == previous.scope
            && self.author.is_some()
            && self.author == previous.author
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> IdentityTracker {
        let mut identity = IdentityTracker::new();
        identity.assert_identity(name);
        identity
    }

    fn line(author: Option<&str>, text: &str) -> ChatLine {
        ChatLine {
            scope: LineScope::Room,
            author: author.map(str::to_string),
            text: text.into(),
            timestamp: Some("12:00".into()),
        }
    }

    #[test]
    fn own_line_is_outgoing() {
        let unit = PresentationUnit::from_line(line(Some("alice"), "hi"), &identity("alice"));
        assert!(unit.is_self);
        assert_eq!(unit.direction(), Direction::Outgoing);
        assert_eq!(unit.timestamp.as_deref(), Some("12:00"));
    }

    #[test]
    fn authorless_line_is_incoming() {
        let unit = PresentationUnit::from_line(line(None, "???"), &identity("alice"));
        assert!(!unit.is_self);
        assert_eq!(unit.direction(), Direction::Incoming);
    }

    #[test]
    fn group_message_is_formatted_for_display() {
        let unit =
            PresentationUnit::group_message("bob".into(), "yo", Some("t".into()), &identity("alice"));
        assert_eq!(unit.text, "[t] bob: yo");
        assert_eq!(unit.scope, LineScope::Group);
        assert!(!unit.is_self);
    }

    #[test]
    fn notices_are_centered() {
        assert_eq!(PresentationUnit::system(LineScope::Room, "x").direction(), Direction::Centered);
        assert_eq!(PresentationUnit::separator(LineScope::Group).direction(), Direction::Centered);
    }

    #[test]
    fn runs_need_same_author_and_scope() {
        let me = identity("alice");
        let first = PresentationUnit::from_line(line(Some("bob"), "1"), &me);
        let second = PresentationUnit::from_line(line(Some("bob"), "2"), &me);
        let other = PresentationUnit::from_line(line(Some("carol"), "3"), &me);
        let notice = PresentationUnit::system(LineScope::Room, "n");

        assert!(second.follows(&first));
        assert!(!other.follows(&second));
        assert!(!second.follows(&notice));

        let mut private = second.clone();
        private.scope = LineScope::Private;
        assert!(!private.follows(&first));
    }
}
