//! Chatroom wire protocol
//!
//! The chatroom server speaks two encodings over one text channel: typed JSON
//! envelopes discriminated by a `type` field, and older plain-text lines that
//! are recognised by reserved prefixes and markers. This crate owns all
//! knowledge of both encodings so that nothing downstream ever inspects raw
//! text.
//!
//! # Components
//!
//! - [`decode`]: classifies one inbound payload into a [`ChatEvent`]
//! - [`Request`]: outbound payloads and their encoding
//! - [`legacy`]: reserved markers and author templates of the text encoding
//! - [`types`]: shared value types (groups, members, chat lines)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod decode;
pub mod envelope;
pub mod errors;
pub mod event;
pub mod legacy;
pub mod types;

pub use decode::{Decoded, decode};
pub use envelope::Request;
pub use errors::{ProtocolError, Result};
pub use event::ChatEvent;
pub use types::{ChatLine, Group, GroupId, GroupMember, HistoryBatch, HistoryOrder, LineScope};
