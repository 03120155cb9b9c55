//! Slash command parsing.
//!
//! Anything that does not start with `/` is a message for the current
//! conversation.

use chatroom_proto::GroupId;

/// A parsed line from the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/connect`
    Connect,
    /// `/room`
    Room,
    /// `/msg <user>`
    Private {
        /// Peer to chat with.
        peer: String,
    },
    /// `/group <id>`
    Group {
        /// Group to view.
        group_id: GroupId,
    },
    /// `/create <name>`
    CreateGroup {
        /// Name of the new group.
        name: String,
    },
    /// `/members [id]`, defaulting to the current group.
    Members {
        /// Group whose members to show.
        group_id: Option<GroupId>,
    },
    /// `/add <user>`
    AddMember {
        /// User to add.
        username: String,
    },
    /// `/remove <user>`
    RemoveMember {
        /// User to remove.
        username: String,
    },
    /// `/close`
    ClosePanel,
    /// `/register <user> <pass>`
    Register {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// `/quit` or `/q`
    Quit,
    /// Plain text.
    Message {
        /// Text to send.
        content: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: String,
        /// What went wrong.
        error: String,
    },
    /// Unrecognized command.
    Unknown {
        /// The full input line.
        input: String,
    },
}

/// Parse one line of input.
pub fn parse(input: &str) -> Command {
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Message { content: input.to_string() };
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("connect", []) => Command::Connect,
        ("room", []) => Command::Room,
        ("msg", [peer]) => Command::Private { peer: (*peer).to_string() },
        ("msg", _) => usage(name, "/msg <user>"),
        ("group", [id]) => match id.parse() {
            Ok(group_id) => Command::Group { group_id },
            Err(_) => invalid(name, format!("invalid group id: {id}")),
        },
        ("group", _) => usage(name, "/group <id>"),
        ("create", []) => usage(name, "/create <name>"),
        ("create", words) => Command::CreateGroup { name: words.join(" ") },
        ("members", []) => Command::Members { group_id: None },
        ("members", [id]) => match id.parse() {
            Ok(group_id) => Command::Members { group_id: Some(group_id) },
            Err(_) => invalid(name, format!("invalid group id: {id}")),
        },
        ("members", _) => usage(name, "/members [id]"),
        ("add", [user]) => Command::AddMember { username: (*user).to_string() },
        ("add", _) => usage(name, "/add <user>"),
        ("remove", [user]) => Command::RemoveMember { username: (*user).to_string() },
        ("remove", _) => usage(name, "/remove <user>"),
        ("close", []) => Command::ClosePanel,
        ("register", [user, pass]) => {
            Command::Register { username: (*user).to_string(), password: (*pass).to_string() }
        },
        ("register", _) => usage(name, "/register <user> <pass>"),
        ("quit" | "q", []) => Command::Quit,
        ("connect" | "room" | "close" | "quit" | "q", _) => invalid(name, "takes no arguments"),
        _ => Command::Unknown { input: input.to_string() },
    }
}

fn usage(command: &str, usage: &str) -> Command {
    invalid(command, format!("usage: {usage}"))
}

fn invalid(command: &str, error: impl Into<String>) -> Command {
    Command::InvalidArgs { command: command.to_string(), error: error.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse("hello there"), Command::Message { content: "hello there".into() });
    }

    #[test]
    fn conversation_commands() {
        assert_eq!(parse("/room"), Command::Room);
        assert_eq!(parse("/msg bob"), Command::Private { peer: "bob".into() });
        assert_eq!(parse("/group 7"), Command::Group { group_id: 7 });
    }

    #[test]
    fn group_name_keeps_spaces() {
        assert_eq!(parse("/create book club"), Command::CreateGroup { name: "book club".into() });
    }

    #[test]
    fn members_id_is_optional() {
        assert_eq!(parse("/members"), Command::Members { group_id: None });
        assert_eq!(parse("/members 3"), Command::Members { group_id: Some(3) });
    }

    #[test]
    fn register_takes_two_arguments() {
        assert_eq!(parse("/register carol secret"), Command::Register {
            username: "carol".into(),
            password: "secret".into(),
        });
        assert!(matches!(parse("/register carol"), Command::InvalidArgs { .. }));
    }

    #[test]
    fn bad_group_id() {
        assert_eq!(parse("/group abc"), Command::InvalidArgs {
            command: "group".into(),
            error: "invalid group id: abc".into(),
        });
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse("/dance"), Command::Unknown { input: "/dance".into() });
    }

    #[test]
    fn quit_aliases() {
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/q"), Command::Quit);
        assert!(matches!(parse("/quit now"), Command::InvalidArgs { .. }));
    }
}
