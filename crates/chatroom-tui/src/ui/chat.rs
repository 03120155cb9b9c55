//! Chat area
//!
//! Draws the transcript. Units arrive fully determined, so this only maps
//! direction and kind to alignment and style.

use chatroom_app::{App, ConversationTarget, Direction, PresentationUnit, UnitKind};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.target() {
        ConversationTarget::Room => " Public room ".to_string(),
        ConversationTarget::Private { peer } => format!(" @{peer} "),
        ConversationTarget::Group(group) => format!(" #{} ({}) ", group.name, group.id),
    };

    let block = Block::default().borders(Borders::ALL).title(title);

    let mut items: Vec<ListItem> = Vec::with_capacity(app.transcript().len());
    let mut previous: Option<&PresentationUnit> = None;
    for unit in app.transcript().units() {
        // A blank line before each new run of messages.
        if unit.kind == UnitKind::Message
            && !unit.continues_previous
            && previous.is_some_and(|p| p.kind == UnitKind::Message)
        {
            items.push(ListItem::new(Line::raw("")));
        }
        items.push(ListItem::new(unit_line(unit)));
        previous = Some(unit);
    }

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

fn unit_line(unit: &PresentationUnit) -> Line<'_> {
    let (alignment, style) = match (unit.direction(), unit.kind) {
        (Direction::Outgoing, _) => (Alignment::Right, Style::default().fg(Color::Green)),
        (Direction::Incoming, _) => (Alignment::Left, Style::default()),
        (Direction::Centered, UnitKind::Separator) => {
            (Alignment::Center, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        },
        (Direction::Centered, _) => (
            Alignment::Center,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    };

    Line::styled(unit.text.as_str(), style).alignment(alignment)
}
