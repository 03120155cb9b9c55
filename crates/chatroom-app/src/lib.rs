//! Application layer for the chatroom client
//!
//! Pure state machines and a generic runtime that turn the server's text
//! stream into conversation state. Nothing here performs I/O: the same code
//! runs behind the terminal frontend and inside tests with a scripted driver.
//!
//! # Components
//!
//! - [`App`]: owns identity, roster, current conversation and transcript
//! - [`Bridge`]: decodes inbound payloads and encodes outbound requests
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod config;
mod driver;
mod error;
mod event;
pub mod history;
pub mod identity;
pub mod present;
pub mod roster;
mod runtime;
pub mod selector;
mod state;
pub mod throttle;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use config::{ClientConfig, Credentials, DEFAULT_SERVER_URL};
pub use driver::Driver;
pub use error::AppError;
pub use event::{AppEvent, TransportEvent};
pub use history::Transcript;
pub use identity::IdentityTracker;
pub use present::{Direction, PresentationUnit, UnitKind};
pub use roster::RosterStore;
pub use runtime::Runtime;
pub use selector::{ConversationSelector, ConversationTarget, SelectorEffect};
pub use state::ConnectionState;
pub use throttle::{RequestThrottler, ResourceKey, ResourceKind};
