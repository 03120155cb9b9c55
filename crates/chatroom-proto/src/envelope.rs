//! JSON envelopes.
//!
//! Every structured payload is a JSON object whose `type` field selects the
//! variant. Inbound envelopes are parsed into [`Inbound`]; outbound payloads
//! are described by [`Request`], which also covers the plain-text requests
//! (room and private messages, login) so callers have one outbound type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{ProtocolError, Result},
    types::{Group, GroupId, GroupMember},
};

/// `type` values this client understands.
pub const KNOWN_TYPES: [&str; 10] = [
    "users_list",
    "groups_list",
    "history",
    "create_group_response",
    "add_member_response",
    "remove_member_response",
    "group_members",
    "group_messages",
    "group_message",
    "notification",
];

/// Inbound JSON envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// Online users.
    UsersList {
        /// Usernames.
        #[serde(default)]
        users: Vec<String>,
    },
    /// Groups the local user has joined.
    GroupsList {
        /// Groups with ownership flags.
        #[serde(default)]
        groups: Vec<Group>,
    },
    /// Recent public history, newest first.
    History {
        /// History entries.
        #[serde(default)]
        messages: Vec<RoomHistoryEntry>,
    },
    /// Outcome of `create_group`.
    CreateGroupResponse {
        /// Human-readable outcome.
        #[serde(default)]
        message: String,
    },
    /// Outcome of `add_group_member`.
    AddMemberResponse {
        /// Human-readable outcome.
        #[serde(default)]
        message: String,
    },
    /// Outcome of `remove_group_member`.
    RemoveMemberResponse {
        /// Human-readable outcome.
        #[serde(default)]
        message: String,
    },
    /// Member list of a group.
    GroupMembers {
        /// Group ID.
        group_id: GroupId,
        /// Members.
        #[serde(default)]
        members: Vec<GroupMember>,
    },
    /// Group history, newest first.
    GroupMessages {
        /// Group ID.
        group_id: GroupId,
        /// History entries.
        #[serde(default)]
        messages: Vec<GroupHistoryEntry>,
    },
    /// A live group message.
    GroupMessage {
        /// Group ID.
        group_id: GroupId,
        /// Author.
        sender: String,
        /// Server timestamp.
        #[serde(default)]
        timestamp: Option<String>,
        /// Pre-formatted display line: `[timestamp] sender: content`.
        #[serde(default)]
        formatted_message: String,
    },
    /// Free-form server notification.
    Notification {
        /// Notification text.
        #[serde(default)]
        message: String,
    },
}

/// Entry of the public `history` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomHistoryEntry {
    /// Author.
    pub sender: String,
    /// Stored display line, already formatted by the server.
    pub raw: String,
    /// Storage timestamp.
    #[serde(default)]
    pub time: Option<String>,
}

/// Entry of the `group_messages` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupHistoryEntry {
    /// Author.
    pub sender: String,
    /// Message body.
    pub message: String,
    /// Storage timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Inbound {
    /// Parse a payload as a typed envelope.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Json`] if `payload` is not JSON or a known envelope
    ///   is missing required fields.
    /// - [`ProtocolError::Untyped`] if the JSON is not an object with a string
    ///   `type`.
    /// - [`ProtocolError::UnknownType`] if `type` is not in [`KNOWN_TYPES`].
    pub fn parse(payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = value.get("type").and_then(Value::as_str).ok_or(ProtocolError::Untyped)?;
        if !KNOWN_TYPES.contains(&kind) {
            return Err(ProtocolError::UnknownType(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Outbound request.
///
/// Room and private messages and the login lines travel as plain text; the
/// group operations travel as JSON envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Public room message, sent verbatim.
    RoomText {
        /// Trimmed message text.
        text: String,
    },
    /// Private message: `@peer text`.
    Private {
        /// Recipient username.
        peer: String,
        /// Trimmed message text.
        text: String,
    },
    /// Post to a group.
    GroupMessage {
        /// Target group.
        group_id: GroupId,
        /// Trimmed message text.
        content: String,
    },
    /// Create a group owned by the local user.
    CreateGroup {
        /// Group name.
        group_name: String,
    },
    /// Add a user to a group.
    AddGroupMember {
        /// Target group.
        group_id: GroupId,
        /// User to add.
        username: String,
    },
    /// Remove a user from a group.
    RemoveGroupMember {
        /// Target group.
        group_id: GroupId,
        /// User to remove.
        username: String,
    },
    /// Fetch a group's member list.
    GetGroupMembers {
        /// Target group.
        group_id: GroupId,
    },
    /// Fetch a group's history.
    GetGroupMessages {
        /// Target group.
        group_id: GroupId,
    },
    /// Answer the login prompt: `user,pass`.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// Register a new account: `register user, pass`.
    Register {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutboundEnvelope<'a> {
    GroupMessage { group_id: GroupId, content: &'a str },
    CreateGroup { group_name: &'a str },
    AddGroupMember { group_id: GroupId, username: &'a str },
    RemoveGroupMember { group_id: GroupId, username: &'a str },
    GetGroupMembers { group_id: GroupId },
    GetGroupMessages { group_id: GroupId },
}

impl Request {
    /// Encode into the text written to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] if envelope serialization fails.
    pub fn encode(&self) -> Result<String> {
        let envelope = match self {
            Self::RoomText { text } => return Ok(text.clone()),
            Self::Private { peer, text } => return Ok(format!("@{peer} {text}")),
            Self::Login { username, password } => return Ok(format!("{username},{password}")),
            Self::Register { username, password } => {
                return Ok(format!("register {username}, {password}"));
            },
            Self::GroupMessage { group_id, content } => {
                OutboundEnvelope::GroupMessage { group_id: *group_id, content }
            },
            Self::CreateGroup { group_name } => OutboundEnvelope::CreateGroup { group_name },
            Self::AddGroupMember { group_id, username } => {
                OutboundEnvelope::AddGroupMember { group_id: *group_id, username }
            },
            Self::RemoveGroupMember { group_id, username } => {
                OutboundEnvelope::RemoveGroupMember { group_id: *group_id, username }
            },
            Self::GetGroupMembers { group_id } => {
                OutboundEnvelope::GetGroupMembers { group_id: *group_id }
            },
            Self::GetGroupMessages { group_id } => {
                OutboundEnvelope::GetGroupMessages { group_id: *group_id }
            },
        };

        Ok(serde_json::to_string(&envelope)?)
    }

    /// Whether the request carries credentials and must not be logged.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Register { .. })
    }
}
