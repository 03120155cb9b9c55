//! Client configuration.

use std::fmt;

/// Server the client connects to when none is configured.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:9002";

/// Login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration of one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the chat server.
    pub server_url: String,
    /// Credentials used to answer the login prompt. `None` leaves login to
    /// the user.
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    /// Configuration for `server_url` without credentials.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self { server_url: server_url.into(), credentials: None }
    }

    /// Answer the login prompt with the given credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}
