//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. Command parsing happens here on Enter.

use chatroom_app::{App, AppAction, AppError};

use crate::commands::{self, Command};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Input state for the TUI.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// correctly.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process (may be empty for input-only keys,
    /// or contain requests for commands).
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.char_count() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.char_count();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Tab => Self::handle_tab(app),
            KeyInput::Esc => {
                if app.member_panel().is_some() {
                    app.close_member_panel()
                } else {
                    app.quit()
                }
            },
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.buffer.char_indices().nth(cursor).map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Handle Enter key - parse command and call App API.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if text.trim().is_empty() {
            return vec![AppAction::Render];
        }

        match commands::parse(&text) {
            Command::Connect => app.connect(),
            Command::Room => app.return_to_room(),
            Command::Private { peer } => app.select_user(&peer),
            Command::Group { group_id } => app.select_group(group_id),
            Command::CreateGroup { name } => app.create_group(&name),
            Command::Members { group_id } => match group_id.or_else(|| app.current_group_id()) {
                Some(group_id) => app.open_member_panel(group_id),
                None => {
                    app.set_status(AppError::NoGroupSelected.to_string());
                    vec![AppAction::Render]
                },
            },
            Command::AddMember { username } => app.add_member(&username),
            Command::RemoveMember { username } => app.remove_member(&username),
            Command::ClosePanel => app.close_member_panel(),
            Command::Register { username, password } => app.register(&username, &password),
            Command::Quit => app.quit(),
            Command::Message { content } => app.send_message(&content),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: {input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                app.set_status(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle Tab key - cycle public room, then each joined group in roster
    /// order, wrapping back to the room.
    fn handle_tab(app: &mut App) -> Vec<AppAction> {
        let group_ids: Vec<_> = app.roster().groups().iter().map(|g| g.id).collect();
        if group_ids.is_empty() {
            return vec![];
        }

        let next = match app.current_group_id() {
            None => group_ids.first().copied(),
            Some(current) => group_ids
                .iter()
                .position(|&id| id == current)
                .and_then(|idx| group_ids.get(idx.saturating_add(1)))
                .copied(),
        };

        match next {
            Some(group_id) => app.select_group(group_id),
            None => app.return_to_room(),
        }
    }
}
