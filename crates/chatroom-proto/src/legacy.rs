//! Legacy plain-text encoding.
//!
//! Before the JSON envelopes existed the server sent every update as a
//! human-readable line. Those lines are still sent for room and private chat,
//! room history and login, so the client recognises them by the reserved
//! markers below.
//!
//! # Author templates
//!
//! Authorship of a line is positional: after an optional bracketed timestamp,
//! the first token is the author when it is immediately followed by one of the
//! [`AuthorTemplate`] role markers. The template only says how the line was
//! encoded; the same author resolves to the same identity under every
//! template.
//!
//! Usernames containing whitespace, `:` or `]` cannot be told apart from the
//! delimiters and will be attributed wrongly. This is a limitation of the
//! encoding.

use crate::types::{ChatLine, LineScope};

/// Prefix of a comma-separated online-user list.
pub const ONLINE_USERS_PREFIX: &str = "在线用户:";

/// First line of a recent-history block.
pub const HISTORY_START_MARKER: &str = "=== 最近";

/// Last line of a recent-history block.
pub const HISTORY_END_MARKER: &str = "=== 历史消息结束 ===";

/// Prefix of server notices.
pub const SYSTEM_PREFIX: &str = "系统:";

/// Marker contained in private-message lines.
pub const PRIVATE_MARKER: &str = "(私)";

/// Marker contained in legacy group-message lines.
pub const GROUP_MARKER: &str = "[群:";

/// Login welcome line, followed by the confirmed username.
pub const LOGIN_WELCOME_PREFIX: &str = "登录成功，欢迎 ";

/// Credential prompt sent right after the connection opens.
pub const LOGIN_PROMPT_PREFIX: &str = "请输入用户名";

/// Credential prompt sent after a rejected login.
pub const LOGIN_FAILED_PREFIX: &str = "登录失败";

/// Registration outcome lines.
pub const REGISTRATION_PREFIXES: [&str; 2] = ["注册成功", "注册失败"];

/// Role marker following the author token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorTemplate {
    /// `alice: text` (group lines).
    Colon,
    /// `alice : text` (room lines).
    SpacedColon,
    /// `alice (私) 对 bob 说: text` (private lines).
    PrivateSuffix,
}

impl AuthorTemplate {
    /// All templates, in matching order.
    pub const ALL: [Self; 3] = [Self::PrivateSuffix, Self::SpacedColon, Self::Colon];

    /// Text that must immediately follow the author token.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Colon => ":",
            Self::SpacedColon => " :",
            Self::PrivateSuffix => " (私)",
        }
    }
}

/// Author and timestamp extracted from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    /// Bracketed timestamp without brackets.
    pub timestamp: Option<&'a str>,
    /// Author token and the template it matched.
    pub author: Option<(&'a str, AuthorTemplate)>,
}

/// Split a line into timestamp and author.
pub fn parse_line(line: &str) -> LineParts<'_> {
    let mut rest = line.trim_start();
    let mut timestamp = None;

    // Leading bracket groups: a timestamp and, on legacy group lines, the
    // group tag. Only the first non-group bracket is the timestamp.
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(end) = inner.find(']') else { break };
        let content = &inner[..end];
        if !rest.starts_with(GROUP_MARKER) && timestamp.is_none() {
            timestamp = Some(content);
        }
        rest = inner[end + 1..].trim_start();
    }

    LineParts { timestamp, author: match_author(rest) }
}

fn match_author(rest: &str) -> Option<(&str, AuthorTemplate)> {
    let end = rest.find(|c: char| c.is_whitespace() || c == ':')?;
    let (name, after) = rest.split_at(end);
    if name.is_empty() {
        return None;
    }

    AuthorTemplate::ALL
        .into_iter()
        .find(|template| after.starts_with(template.marker()))
        .map(|template| (name, template))
}

/// Scope implied by the markers contained in a line.
pub fn scope_of(line: &str) -> LineScope {
    if line.contains(PRIVATE_MARKER) {
        LineScope::Private
    } else if line.contains(GROUP_MARKER) {
        LineScope::Group
    } else {
        LineScope::Room
    }
}

/// Build a [`ChatLine`] from a legacy line with the given scope.
pub fn chat_line(scope: LineScope, line: &str) -> ChatLine {
    let parts = parse_line(line);
    ChatLine {
        scope,
        author: parts.author.map(|(name, _)| name.to_string()),
        text: line.to_string(),
        timestamp: parts.timestamp.map(str::to_string),
    }
}

/// Username carried by a login welcome line, if `line` is one.
pub fn welcome_username(line: &str) -> Option<&str> {
    let name = line.trim_start().strip_prefix(LOGIN_WELCOME_PREFIX)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Display line for a group message.
pub fn group_line(timestamp: Option<&str>, sender: &str, text: &str) -> String {
    match timestamp {
        Some(ts) => format!("[{ts}] {sender}: {text}"),
        None => format!("{sender}: {text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_template() {
        let parts = parse_line("[12:00] alice: hi");
        assert_eq!(parts.timestamp, Some("12:00"));
        assert_eq!(parts.author, Some(("alice", AuthorTemplate::Colon)));
    }

    #[test]
    fn spaced_colon_template_with_spaced_timestamp() {
        let parts = parse_line("[2024-05-01 09:30:00] bob : morning");
        assert_eq!(parts.timestamp, Some("2024-05-01 09:30:00"));
        assert_eq!(parts.author, Some(("bob", AuthorTemplate::SpacedColon)));
    }

    #[test]
    fn private_suffix_template() {
        let parts = parse_line("[2024-05-01 09:30:00] carol (私) 对 bob 说: psst");
        assert_eq!(parts.author, Some(("carol", AuthorTemplate::PrivateSuffix)));
    }

    #[test]
    fn group_tag_is_not_a_timestamp() {
        let parts = parse_line("[群:dev] [10:00] dave: ship it");
        assert_eq!(parts.timestamp, Some("10:00"));
        assert_eq!(parts.author, Some(("dave", AuthorTemplate::Colon)));
    }

    #[test]
    fn no_author_without_role_marker() {
        assert_eq!(parse_line("登录成功，欢迎 alice").author, None);
        assert_eq!(parse_line("").author, None);
        assert_eq!(parse_line(": leading colon").author, None);
    }

    #[test]
    fn welcome_line_captures_username() {
        assert_eq!(welcome_username("登录成功，欢迎 alice\n"), Some("alice"));
        assert_eq!(welcome_username("登录成功，欢迎 "), None);
        assert_eq!(welcome_username("alice: 登录成功，欢迎 bob"), None);
    }

    #[test]
    fn scope_markers() {
        assert_eq!(scope_of("[t] a (私) 对 b 说: x"), LineScope::Private);
        assert_eq!(scope_of("[群:dev] a: x"), LineScope::Group);
        assert_eq!(scope_of("[t] a : x"), LineScope::Room);
    }
}
