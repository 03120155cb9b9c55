//! Decoded inbound events.

use crate::types::{ChatLine, Group, GroupId, GroupMember, HistoryBatch};

/// The decoded form of one inbound payload.
///
/// Closed set: every payload decodes to exactly one variant, and consumers
/// match exhaustively. Events are transient and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Full replacement of the online-user set.
    RosterUpdate {
        /// Online usernames in server order.
        users: Vec<String>,
    },

    /// Full replacement of the joined-group set.
    GroupRosterUpdate {
        /// Joined groups in server order.
        groups: Vec<Group>,
    },

    /// Member list of one group, possibly with duplicates.
    GroupMembersUpdate {
        /// Group the list belongs to.
        group_id: GroupId,
        /// Members as sent by the server.
        members: Vec<GroupMember>,
    },

    /// History of one group.
    GroupHistoryBatch {
        /// Group the history belongs to.
        group_id: GroupId,
        /// Records and their source order.
        batch: HistoryBatch,
    },

    /// A new message posted to a group.
    GroupLiveMessage {
        /// Target group.
        group_id: GroupId,
        /// Author username.
        sender: String,
        /// Message body.
        text: String,
        /// Server timestamp, if present.
        timestamp: Option<String>,
    },

    /// A live room, private or legacy group line.
    LiveLine(ChatLine),

    /// Room history block.
    HistoryBatch(HistoryBatch),

    /// Server notice. Empty text means "ignore".
    SystemNotice {
        /// Notice text.
        text: String,
    },

    /// Server confirmed the local user's identity.
    IdentityAssertion {
        /// Confirmed username.
        username: String,
    },

    /// Server is asking for credentials.
    LoginPrompt {
        /// Previous attempt was rejected.
        retry: bool,
        /// Prompt text.
        text: String,
    },
}

impl ChatEvent {
    /// Notice that consumers drop without effect.
    pub fn ignored() -> Self {
        Self::SystemNotice { text: String::new() }
    }

    /// Whether this event is the no-op notice.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::SystemNotice { text } if text.is_empty())
    }
}
