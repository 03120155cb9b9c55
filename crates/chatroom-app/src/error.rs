//! Rejected user operations.

use chatroom_proto::GroupId;
use thiserror::Error;

/// Why the App refused a user operation.
///
/// A rejected operation never reaches the transport; the App reports it on
/// the status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Input was empty after trimming.
    #[error("nothing to send")]
    EmptyInput,

    /// Operation needs a group but none is selected or being managed.
    #[error("no group selected")]
    NoGroupSelected,

    /// Group is not in the joined set.
    #[error("unknown group {0}")]
    UnknownGroup(GroupId),

    /// User is not in the online set.
    #[error("{0} is not online")]
    UnknownUser(String),

    /// Local user does not own the group.
    #[error("only the owner of {0} can manage its members")]
    NotOwner(String),

    /// Request would be dropped because there is no open connection.
    #[error("not connected")]
    NotConnected,

    /// Target member owns the group.
    #[error("{0} owns the group and cannot be removed")]
    CannotRemoveOwner(String),
}
