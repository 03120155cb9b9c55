//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns every piece of
//! client state and is completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute. User
//! operations are methods that return actions the same way.
//!
//! # Responsibilities
//!
//! - Applies decoded server events to the identity, roster and transcript.
//! - Owns the current conversation and the member panel.
//! - Throttles member-list fetches and discards stale responses.
//! - Validates user operations before anything reaches the transport.
//! - Answers the server's login prompt when credentials are configured.

use chatroom_proto::{ChatEvent, GroupId, GroupMember, HistoryBatch, LineScope, Request};

use crate::{
    AppAction, AppError, AppEvent, ClientConfig, ConnectionState, IdentityTracker,
    PresentationUnit, RosterStore, Transcript,
    present::group_history_heading,
    selector::{ConversationSelector, ConversationTarget, SelectorEffect},
    throttle::{RequestThrottler, ResourceKey},
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a server.
#[derive(Debug, Clone)]
pub struct App {
    /// Server and login configuration.
    config: ClientConfig,
    /// Connection state.
    state: ConnectionState,
    /// Confirmed local identity.
    identity: IdentityTracker,
    /// Online users, joined groups and member lists.
    roster: RosterStore,
    /// Current conversation.
    selector: ConversationSelector,
    /// Outstanding member-list fetches.
    throttler: RequestThrottler,
    /// Transcript of the current view.
    transcript: Transcript,
    /// Group whose members are being managed. `None` if the panel is closed.
    member_panel: Option<GroupId>,
    /// Login prompt already answered on this connection.
    login_answered: bool,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
            identity: IdentityTracker::new(),
            roster: RosterStore::new(),
            selector: ConversationSelector::new(),
            throttler: RequestThrottler::new(),
            transcript: Transcript::new(),
            member_panel: None,
            login_answered: false,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                self.status_message = Some(format!("Connecting to {}...", self.config.server_url));
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.state = ConnectionState::Connected;
                self.login_answered = false;
                self.status_message = Some(format!("Connected to {}", self.config.server_url));
                self.notice("Connected to server");
                vec![AppAction::Render]
            },
            AppEvent::Disconnected => {
                self.state = ConnectionState::Disconnected;
                self.status_message = Some("Disconnected".to_string());
                self.notice("Disconnected from server");
                vec![AppAction::Render]
            },
            AppEvent::TransportFailed { message } => {
                self.state = ConnectionState::Disconnected;
                self.status_message = Some(format!("Connection error: {message}"));
                self.notice(format!("Connection error: {message}"));
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
            AppEvent::Chat(event) => self.apply(event),
        }
    }

    fn apply(&mut self, event: ChatEvent) -> Vec<AppAction> {
        match event {
            ChatEvent::RosterUpdate { users } => {
                self.roster.replace_users(users);
            },
            ChatEvent::GroupRosterUpdate { groups } => {
                self.roster.replace_groups(groups);
                if let Some(group) = self.current_group_id().and_then(|id| self.roster.group(id)) {
                    self.selector.refresh_group(group);
                }
                if self.member_panel.is_some_and(|id| self.roster.group(id).is_none()) {
                    self.member_panel = None;
                }
            },
            ChatEvent::GroupMembersUpdate { group_id, members } => {
                self.apply_members(group_id, members);
            },
            ChatEvent::GroupHistoryBatch { group_id, mut batch } => {
                let ConversationTarget::Group(group) = self.selector.target() else {
                    tracing::debug!(group_id, "Discarding group history outside a group view");
                    return vec![];
                };
                if group.id != group_id {
                    tracing::debug!(group_id, "Discarding history for a group not in view");
                    return vec![];
                }
                if batch.heading.is_none() {
                    batch.heading = Some(group_history_heading(&group.name));
                }
                self.transcript.clear();
                self.transcript.reconcile(LineScope::Group, batch, &self.identity);
                self.roster.clear_unread(group_id);
            },
            ChatEvent::GroupLiveMessage { group_id, sender, text, timestamp } => {
                if self.current_group_id() != Some(group_id) {
                    self.roster.mark_unread(group_id);
                    return vec![AppAction::Render];
                }
                let unit =
                    PresentationUnit::group_message(sender, &text, timestamp, &self.identity);
                self.transcript.push(unit);
            },
            ChatEvent::LiveLine(line) => {
                let unit = PresentationUnit::from_line(line, &self.identity);
                self.transcript.push(unit);
            },
            ChatEvent::HistoryBatch(batch) => self.apply_room_history(batch),
            ChatEvent::SystemNotice { text } => {
                if text.is_empty() {
                    return vec![];
                }
                self.notice(text);
            },
            ChatEvent::IdentityAssertion { username } => {
                self.status_message = Some(format!("Logged in as {username}"));
                self.identity.assert_identity(username);
            },
            ChatEvent::LoginPrompt { retry, text } => return self.answer_login(retry, text),
        }
        vec![AppAction::Render]
    }

    fn apply_members(&mut self, group_id: GroupId, members: Vec<GroupMember>) {
        self.throttler.complete(ResourceKey::group_members(group_id));

        let in_view =
            self.member_panel == Some(group_id) || self.current_group_id() == Some(group_id);
        if in_view {
            self.roster.record_members(group_id, members);
        } else {
            tracing::debug!(group_id, "Discarding member list for a group not in view");
        }
    }

    fn apply_room_history(&mut self, batch: HistoryBatch) {
        if self.current_group_id().is_some() {
            tracing::debug!("Discarding room history while a group is in view");
            return;
        }
        self.transcript.reconcile(LineScope::Room, batch, &self.identity);
    }

    fn answer_login(&mut self, retry: bool, text: String) -> Vec<AppAction> {
        self.notice(text);

        if retry {
            self.status_message = Some("Login failed".to_string());
            return vec![AppAction::Render];
        }
        if self.login_answered {
            return vec![AppAction::Render];
        }

        match self.config.credentials.clone() {
            Some(credentials) => {
                self.login_answered = true;
                self.status_message = Some(format!("Logging in as {}...", credentials.username));
                vec![
                    AppAction::Send(Request::Login {
                        username: credentials.username,
                        password: credentials.password,
                    }),
                    AppAction::Render,
                ]
            },
            None => {
                self.status_message = Some("Enter user,pass to log in".to_string());
                vec![AppAction::Render]
            },
        }
    }

    fn notice(&mut self, text: impl Into<String>) {
        let scope = self.selector.target().scope();
        self.transcript.push(PresentationUnit::system(scope, text));
    }

    /// Report a rejected operation on the status line.
    fn reject(&mut self, error: &AppError) -> Vec<AppAction> {
        tracing::debug!(%error, "Rejected user operation");
        self.status_message = Some(error.to_string());
        vec![AppAction::Render]
    }

    fn apply_effects(&mut self, effects: Vec<SelectorEffect>) -> Vec<AppAction> {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                SelectorEffect::ClearTranscript => self.transcript.clear(),
                SelectorEffect::Notice(text) => self.notice(text),
                SelectorEffect::Request(request) => actions.push(AppAction::Send(request)),
            }
        }
        actions.push(AppAction::Render);
        actions
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Initiate connection to the server.
    pub fn connect(&mut self) -> Vec<AppAction> {
        if self.state != ConnectionState::Disconnected {
            self.status_message = Some(format!("Already {}", self.state));
            return vec![AppAction::Render];
        }
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect { server_addr: self.config.server_url.clone() }, AppAction::Render]
    }

    /// Start a private chat with an online user.
    pub fn select_user(&mut self, peer: &str) -> Vec<AppAction> {
        if !self.roster.is_online(peer) {
            return self.reject(&AppError::UnknownUser(peer.to_string()));
        }
        let effects = self.selector.select_user(peer);
        self.status_message = Some(format!("Private chat with {peer}"));
        self.apply_effects(effects)
    }

    /// View a joined group and fetch its history.
    pub fn select_group(&mut self, group_id: GroupId) -> Vec<AppAction> {
        let Some(group) = self.roster.group(group_id).cloned() else {
            return self.reject(&AppError::UnknownGroup(group_id));
        };
        self.status_message = Some(format!("Group {}", group.name));
        self.roster.clear_unread(group_id);
        let effects = self.selector.select_group(group);
        self.apply_effects(effects)
    }

    /// Go back to the public room.
    pub fn return_to_room(&mut self) -> Vec<AppAction> {
        let effects = self.selector.return_to_room();
        if effects.is_empty() {
            return vec![];
        }
        self.status_message = None;
        self.apply_effects(effects)
    }

    /// Send `text` to the current conversation.
    pub fn send_message(&mut self, text: &str) -> Vec<AppAction> {
        let text = text.trim();
        if text.is_empty() {
            return self.reject(&AppError::EmptyInput);
        }

        let request = match self.selector.target() {
            ConversationTarget::Room => Request::RoomText { text: text.to_string() },
            ConversationTarget::Private { peer } => {
                Request::Private { peer: peer.clone(), text: text.to_string() }
            },
            ConversationTarget::Group(group) => {
                Request::GroupMessage { group_id: group.id, content: text.to_string() }
            },
        };
        vec![AppAction::Send(request), AppAction::Render]
    }

    /// Create a group owned by the local user.
    pub fn create_group(&mut self, name: &str) -> Vec<AppAction> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(&AppError::EmptyInput);
        }
        self.status_message = Some(format!("Creating group {name}..."));
        vec![AppAction::Send(Request::CreateGroup { group_name: name.to_string() }), AppAction::Render]
    }

    /// Open the member panel for `group_id` and fetch its members.
    ///
    /// Nothing is sent while a fetch for the same group is outstanding. While
    /// disconnected the panel stays closed and no fetch is marked pending, since
    /// no response could ever clear it.
    pub fn open_member_panel(&mut self, group_id: GroupId) -> Vec<AppAction> {
        if self.roster.group(group_id).is_none() {
            return self.reject(&AppError::UnknownGroup(group_id));
        }
        if self.state != ConnectionState::Connected {
            return self.reject(&AppError::NotConnected);
        }
        self.member_panel = Some(group_id);

        if self.throttler.try_begin(ResourceKey::group_members(group_id)) {
            vec![AppAction::Send(Request::GetGroupMembers { group_id }), AppAction::Render]
        } else {
            tracing::debug!(group_id, "Member list already requested");
            vec![AppAction::Render]
        }
    }

    /// Close the member panel.
    pub fn close_member_panel(&mut self) -> Vec<AppAction> {
        if self.member_panel.take().is_none() {
            return vec![];
        }
        vec![AppAction::Render]
    }

    /// Add `username` to the managed group.
    pub fn add_member(&mut self, username: &str) -> Vec<AppAction> {
        match self.managed_group(username) {
            Ok((group_id, username)) => {
                self.status_message = Some(format!("Adding {username}..."));
                vec![AppAction::Send(Request::AddGroupMember { group_id, username }), AppAction::Render]
            },
            Err(e) => self.reject(&e),
        }
    }

    /// Remove `username` from the managed group.
    pub fn remove_member(&mut self, username: &str) -> Vec<AppAction> {
        let (group_id, username) = match self.managed_group(username) {
            Ok(target) => target,
            Err(e) => return self.reject(&e),
        };
        if self.roster.is_member_owner(group_id, &username) {
            return self.reject(&AppError::CannotRemoveOwner(username));
        }
        self.status_message = Some(format!("Removing {username}..."));
        vec![AppAction::Send(Request::RemoveGroupMember { group_id, username }), AppAction::Render]
    }

    /// Validate a member-management target: panel group first, then the
    /// current group.
    fn managed_group(&self, username: &str) -> Result<(GroupId, String), AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::EmptyInput);
        }
        let group_id =
            self.member_panel.or_else(|| self.current_group_id()).ok_or(AppError::NoGroupSelected)?;
        let group = self.roster.group(group_id).ok_or(AppError::UnknownGroup(group_id))?;
        if !group.is_owner {
            return Err(AppError::NotOwner(group.name.clone()));
        }
        Ok((group_id, username.to_string()))
    }

    /// Register a new account.
    pub fn register(&mut self, username: &str, password: &str) -> Vec<AppAction> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return self.reject(&AppError::EmptyInput);
        }
        self.status_message = Some(format!("Registering {username}..."));
        vec![
            AppAction::Send(Request::Register {
                username: username.to_string(),
                password: password.to_string(),
            }),
            AppAction::Render,
        ]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Confirmed local identity.
    pub fn identity(&self) -> &IdentityTracker {
        &self.identity
    }

    /// Online users, groups and member lists.
    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    /// Current conversation.
    pub fn target(&self) -> &ConversationTarget {
        self.selector.target()
    }

    /// ID of the group in view, if any.
    pub fn current_group_id(&self) -> Option<GroupId> {
        self.selector.target().group_id()
    }

    /// Transcript of the current view.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Group whose member panel is open.
    pub fn member_panel(&self) -> Option<GroupId> {
        self.member_panel
    }

    /// Whether a member-list fetch for `group_id` is outstanding.
    pub fn members_pending(&self, group_id: GroupId) -> bool {
        self.throttler.is_pending(ResourceKey::group_members(group_id))
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
