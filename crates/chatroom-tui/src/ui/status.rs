//! Status bar
//!
//! Displays connection status, identity, the conversation target and the
//! last status message.

use chatroom_app::{App, ConnectionState, ConversationTarget};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let identity = app.identity().username().map_or_else(String::new, |name| format!(" as {name}"));

    let target = match app.target() {
        ConversationTarget::Room => " | room".to_string(),
        ConversationTarget::Private { peer } => format!(" | @{peer}"),
        ConversationTarget::Group(group) => format!(" | #{}", group.name),
    };

    let message = app.status_message().map_or_else(String::new, |m| format!(" | {m}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::raw(identity),
        Span::styled(target, Style::default().fg(Color::Gray)),
        Span::styled(message, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
