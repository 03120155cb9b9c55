//! Terminal UI for the chatroom client.
//!
//! A thin shell over [`chatroom_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`chatroom_app::Runtime`].
//!
//! # Components
//!
//! - [`transport`]: WebSocket bridged to tokio channels
//! - [`terminal`]: crossterm events and ratatui rendering
//! - [`input`] and [`commands`]: line editing and slash commands
//! - [`ui`]: pure rendering of App state

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use chatroom_app::{App, AppAction, AppEvent, ClientConfig, Credentials, Driver, Runtime};
pub use input::{InputState, KeyInput};
pub use terminal::{TerminalDriver, TerminalError};
pub use transport::{Connection, TransportError};
