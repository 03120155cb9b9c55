//! Sidebar
//!
//! Online users, joined groups with owner and unread markers, and the member
//! panel when it is open.

use chatroom_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";
const UNREAD_MARKER: &str = "*";
const OWNER_BADGE: &str = "@";
const EMPTY_MARKER: &str = "";

enum GroupDisplayState {
    Active,
    Unread,
    Normal,
}

/// Render the sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let constraints = if app.member_panel().is_some() {
        vec![Constraint::Percentage(30), Constraint::Percentage(35), Constraint::Percentage(35)]
    } else {
        vec![Constraint::Percentage(45), Constraint::Percentage(55)]
    };
    let chunks =
        Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    if let Some(users_area) = chunks.first() {
        render_users(frame, app, *users_area);
    }
    if let Some(groups_area) = chunks.get(1) {
        render_groups(frame, app, *groups_area);
    }
    if let (Some(members_area), Some(group_id)) = (chunks.get(2), app.member_panel()) {
        render_members(frame, app, group_id, *members_area);
    }
}

fn render_users(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .roster()
        .users()
        .iter()
        .map(|user| {
            if app.identity().is_self(user) {
                ListItem::new(Line::from(vec![
                    Span::styled(user.as_str(), Style::default().fg(Color::Green)),
                    Span::styled(" (you)", Style::default().fg(Color::DarkGray)),
                ]))
            } else {
                ListItem::new(Line::raw(user.as_str()))
            }
        })
        .collect();

    let title = format!(" Online ({}) ", items.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn render_groups(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .roster()
        .groups()
        .iter()
        .map(|group| {
            let state = if app.current_group_id() == Some(group.id) {
                GroupDisplayState::Active
            } else if app.roster().is_unread(group.id) {
                GroupDisplayState::Unread
            } else {
                GroupDisplayState::Normal
            };

            let (prefix, suffix, style) = match state {
                GroupDisplayState::Active => (
                    ACTIVE_PREFIX,
                    EMPTY_MARKER,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                GroupDisplayState::Unread => {
                    (INACTIVE_PREFIX, UNREAD_MARKER, Style::default().fg(Color::Cyan))
                },
                GroupDisplayState::Normal => (INACTIVE_PREFIX, EMPTY_MARKER, Style::default()),
            };
            let badge = if group.is_owner { OWNER_BADGE } else { EMPTY_MARKER };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{} {}", group.id, group.name), style),
                Span::styled(badge, Style::default().fg(Color::Magenta)),
                Span::styled(suffix, Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Groups ");
    frame.render_widget(List::new(items).block(block), area);
}

fn render_members(frame: &mut Frame, app: &App, group_id: chatroom_proto::GroupId, area: Rect) {
    let members = app.roster().members_for(group_id);

    let items: Vec<ListItem> = if members.is_empty() && app.members_pending(group_id) {
        vec![ListItem::new(Span::styled("loading...", Style::default().fg(Color::DarkGray)))]
    } else {
        members
            .iter()
            .map(|member| {
                let role = if member.is_owner { " owner" } else { EMPTY_MARKER };
                ListItem::new(Line::from(vec![
                    Span::raw(member.username.as_str()),
                    Span::styled(role, Style::default().fg(Color::Magenta)),
                ]))
            })
            .collect()
    };

    let name = app.roster().group(group_id).map_or("?", |g| g.name.as_str());
    let block = Block::default().borders(Borders::ALL).title(format!(" Members of {name} "));
    frame.render_widget(List::new(items).block(block), area);
}
