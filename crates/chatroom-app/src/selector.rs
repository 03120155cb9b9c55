//! Current conversation and the side effects of switching it.
//!
//! The selector owns the single source of truth for "which conversation am I
//! viewing". Transitions return [`SelectorEffect`]s instead of touching the
//! transcript or the transport, so the [`crate::App`] applies them in order.

use chatroom_proto::{Group, GroupId, LineScope, Request};

/// Notice added to the transcript when returning to the public room.
pub const ROOM_NOTICE: &str = "Switched to public room";

/// The conversation being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationTarget {
    /// Public room.
    #[default]
    Room,
    /// One-to-one chat.
    Private {
        /// The other participant.
        peer: String,
    },
    /// Group chat.
    Group(Group),
}

impl ConversationTarget {
    /// Group ID when viewing a group.
    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            Self::Group(group) => Some(group.id),
            Self::Room | Self::Private { .. } => None,
        }
    }

    /// Scope of messages sent to this target.
    pub fn scope(&self) -> LineScope {
        match self {
            Self::Room => LineScope::Room,
            Self::Private { .. } => LineScope::Private,
            Self::Group(_) => LineScope::Group,
        }
    }
}

/// Side effect of a selector transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEffect {
    /// Drop every transcript unit.
    ClearTranscript,
    /// Add a notice to the transcript.
    Notice(String),
    /// Send a request to the server.
    Request(Request),
}

/// Conversation state machine. Starts in [`ConversationTarget::Room`].
#[derive(Debug, Clone, Default)]
pub struct ConversationSelector {
    target: ConversationTarget,
}

impl ConversationSelector {
    /// Selector viewing the public room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target.
    pub fn target(&self) -> &ConversationTarget {
        &self.target
    }

    /// Switch to a private chat with `peer`.
    pub fn select_user(&mut self, peer: impl Into<String>) -> Vec<SelectorEffect> {
        self.target = ConversationTarget::Private { peer: peer.into() };
        Vec::new()
    }

    /// Switch to `group` and fetch its history.
    ///
    /// The fetch is emitted on every call, reselection included. Leaving a
    /// different group clears the transcript first.
    pub fn select_group(&mut self, group: Group) -> Vec<SelectorEffect> {
        let mut effects = Vec::with_capacity(2);
        if matches!(self.target, ConversationTarget::Group(_)) {
            effects.push(SelectorEffect::ClearTranscript);
        }
        effects.push(SelectorEffect::Request(Request::GetGroupMessages { group_id: group.id }));
        self.target = ConversationTarget::Group(group);
        effects
    }

    /// Return to the public room. No-op when already there.
    pub fn return_to_room(&mut self) -> Vec<SelectorEffect> {
        if self.target == ConversationTarget::Room {
            return Vec::new();
        }
        self.target = ConversationTarget::Room;
        vec![SelectorEffect::ClearTranscript, SelectorEffect::Notice(ROOM_NOTICE.to_string())]
    }

    /// Refresh the stored group after the joined-group set changed.
    pub fn refresh_group(&mut self, group: &Group) {
        match &mut self.target {
            ConversationTarget::Group(current) if current.id == group.id => *current = group.clone(),
            _ => {},
        }
    }
}
