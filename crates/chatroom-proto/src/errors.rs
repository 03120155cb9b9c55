//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding or decoding wire payloads.
///
/// Inbound decoding never surfaces these to callers: a payload that fails
/// structured parsing falls back to text classification. They are returned by
/// the lower-level envelope helpers and by outbound encoding.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON (de)serialization failed.
    #[error("invalid JSON envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON object carried a `type` this client does not know.
    #[error("unrecognized envelope type: {0}")]
    UnknownType(String),

    /// JSON value was not an object with a string `type` field.
    #[error("payload is not a typed envelope")]
    Untyped,
}
