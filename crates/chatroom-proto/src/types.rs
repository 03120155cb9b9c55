//! Value types shared by the decoder, the encoder and the application layer.

use serde::{Deserialize, Serialize};

/// Server-assigned group identifier.
pub type GroupId = i64;

/// A group the local user has joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable server-assigned ID.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Whether the local user owns this group.
    #[serde(default)]
    pub is_owner: bool,
}

impl Group {
    /// Create a group value.
    pub fn new(id: GroupId, name: impl Into<String>, is_owner: bool) -> Self {
        Self { id, name: name.into(), is_owner }
    }
}

/// One entry of a group's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Member's username.
    pub username: String,
    /// Whether this member owns the group.
    #[serde(default)]
    pub is_owner: bool,
}

impl GroupMember {
    /// Create a member value.
    pub fn new(username: impl Into<String>, is_owner: bool) -> Self {
        Self { username: username.into(), is_owner }
    }
}

/// Conversation scope a text line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineScope {
    /// Public room.
    Room,
    /// One-to-one private chat.
    Private,
    /// Group chat.
    Group,
}

/// A single chat line with its author and timestamp already extracted.
///
/// `text` is the full display line as the server formatted it. `author` is
/// `None` when no author template matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Scope the line was tagged with.
    pub scope: LineScope,
    /// Author token, if one of the author templates matched.
    pub author: Option<String>,
    /// Display text.
    pub text: String,
    /// Timestamp text without brackets, if present.
    pub timestamp: Option<String>,
}

/// Order in which a history family delivers its records.
///
/// This is a property of the encoding family, not of a single response: the
/// JSON `history` and `group_messages` envelopes are newest-first, legacy text
/// history blocks are oldest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrder {
    /// Oldest record first (chronological).
    OldestFirst,
    /// Newest record first.
    NewestFirst,
}

/// A batch of historical records as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBatch {
    /// Heading line supplied by the server, if any.
    pub heading: Option<String>,
    /// Records in source order.
    pub records: Vec<ChatLine>,
    /// Source ordering of `records`.
    pub order: HistoryOrder,
}

impl HistoryBatch {
    /// Records in chronological (oldest-first) order.
    pub fn chronological(self) -> Vec<ChatLine> {
        let mut records = self.records;
        if self.order == HistoryOrder::NewestFirst {
            records.reverse();
        }
        records
    }
}
