//! Inbound payload classification.
//!
//! [`decode`] is total: every payload produces exactly one [`ChatEvent`] and
//! never an error. Structured parsing is tried first; anything that is not a
//! JSON object falls back to the legacy text rules.
//!
//! # Classification order
//!
//! 1. JSON object with a known `type`: mapped to its event. A JSON object with
//!    an unknown `type`, or a known `type` with unusable fields, decodes to the
//!    ignored notice.
//! 2. Legacy text, first match wins: online-user list, history block, system
//!    notice, login prompt, server status line, private line, group line, room
//!    line.
//!
//! A payload that is exactly one login welcome line also yields an identity
//! assertion in [`Decoded::identity`]. Welcome text anywhere else (inside a
//! chat line, a history block, or a JSON field) is written by other users and
//! never asserts identity.

use serde_json::Value;

use crate::{
    envelope::{GroupHistoryEntry, Inbound, RoomHistoryEntry},
    errors::ProtocolError,
    event::ChatEvent,
    legacy,
    types::{ChatLine, HistoryBatch, HistoryOrder, LineScope},
};

/// Result of decoding one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Primary classification.
    pub event: ChatEvent,
    /// Username confirmed when the payload is a login welcome line.
    pub identity: Option<String>,
}

impl Decoded {
    /// Events in the order they must be applied.
    ///
    /// The identity assertion comes first so authorship of the primary event
    /// is judged against the freshly confirmed identity.
    pub fn into_events(self) -> Vec<ChatEvent> {
        let mut events = Vec::with_capacity(2);
        if let Some(username) = self.identity {
            events.push(ChatEvent::IdentityAssertion { username });
        }
        events.push(self.event);
        events
    }
}

/// Classify one inbound payload.
pub fn decode(payload: &str) -> Decoded {
    match serde_json::from_str::<Value>(payload) {
        Ok(value @ Value::Object(_)) => Decoded { event: decode_envelope(value), identity: None },
        _ => decode_text(payload),
    }
}

fn decode_envelope(value: Value) -> ChatEvent {
    match Inbound::from_value(value) {
        Ok(inbound) => from_inbound(inbound),
        Err(ProtocolError::UnknownType(kind)) => {
            tracing::debug!(%kind, "Ignoring envelope with unknown type");
            ChatEvent::ignored()
        },
        Err(e) => {
            tracing::warn!(error = %e, "Dropping malformed envelope");
            ChatEvent::ignored()
        },
    }
}

fn from_inbound(inbound: Inbound) -> ChatEvent {
    match inbound {
        Inbound::UsersList { users } => ChatEvent::RosterUpdate { users },
        Inbound::GroupsList { groups } => ChatEvent::GroupRosterUpdate { groups },
        Inbound::History { messages } => ChatEvent::HistoryBatch(HistoryBatch {
            heading: None,
            records: messages.into_iter().map(room_history_line).collect(),
            order: HistoryOrder::NewestFirst,
        }),
        Inbound::CreateGroupResponse { message }
        | Inbound::AddMemberResponse { message }
        | Inbound::RemoveMemberResponse { message }
        | Inbound::Notification { message } => ChatEvent::SystemNotice { text: message },
        Inbound::GroupMembers { group_id, members } => {
            ChatEvent::GroupMembersUpdate { group_id, members }
        },
        Inbound::GroupMessages { group_id, messages } => ChatEvent::GroupHistoryBatch {
            group_id,
            batch: HistoryBatch {
                heading: None,
                records: messages.into_iter().map(group_history_line).collect(),
                order: HistoryOrder::NewestFirst,
            },
        },
        Inbound::GroupMessage { group_id, sender, timestamp, formatted_message } => {
            let prefix = legacy::group_line(timestamp.as_deref(), &sender, "");
            let text = formatted_message
                .strip_prefix(prefix.as_str())
                .map_or_else(|| formatted_message.clone(), str::to_string);
            ChatEvent::GroupLiveMessage { group_id, sender, text, timestamp }
        },
    }
}

fn room_history_line(entry: RoomHistoryEntry) -> ChatLine {
    ChatLine {
        scope: legacy::scope_of(&entry.raw),
        author: Some(entry.sender),
        text: entry.raw,
        timestamp: entry.time,
    }
}

fn group_history_line(entry: GroupHistoryEntry) -> ChatLine {
    ChatLine {
        scope: LineScope::Group,
        text: legacy::group_line(entry.timestamp.as_deref(), &entry.sender, &entry.message),
        author: Some(entry.sender),
        timestamp: entry.timestamp,
    }
}

fn decode_text(payload: &str) -> Decoded {
    let text = payload.trim_end_matches(['\r', '\n']);

    let identity =
        if text.contains('\n') { None } else { legacy::welcome_username(text).map(str::to_string) };
    if identity.is_some() {
        return Decoded { event: ChatEvent::SystemNotice { text: text.to_string() }, identity };
    }

    Decoded { event: classify_text(text), identity: None }
}

fn classify_text(text: &str) -> ChatEvent {
    if let Some(list) = text.strip_prefix(legacy::ONLINE_USERS_PREFIX) {
        let users = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        return ChatEvent::RosterUpdate { users };
    }

    if text.starts_with(legacy::HISTORY_START_MARKER) {
        return ChatEvent::HistoryBatch(decode_history_block(text));
    }

    if text.starts_with(legacy::SYSTEM_PREFIX) {
        return ChatEvent::SystemNotice { text: text.to_string() };
    }

    if text.starts_with(legacy::LOGIN_PROMPT_PREFIX) {
        return ChatEvent::LoginPrompt { retry: false, text: text.to_string() };
    }
    if text.starts_with(legacy::LOGIN_FAILED_PREFIX) {
        return ChatEvent::LoginPrompt { retry: true, text: text.to_string() };
    }

    if legacy::REGISTRATION_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        return ChatEvent::SystemNotice { text: text.to_string() };
    }

    ChatEvent::LiveLine(legacy::chat_line(legacy::scope_of(text), text))
}

fn decode_history_block(text: &str) -> HistoryBatch {
    let mut lines = text.lines();
    let heading = lines.next().map(|line| line.trim().to_string());

    let records = lines
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && *line != legacy::HISTORY_END_MARKER)
        .map(|line| legacy::chat_line(legacy::scope_of(line), line))
        .collect();

    HistoryBatch { heading, records, order: HistoryOrder::OldestFirst }
}
