//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: client state machine
//! - [`Bridge`]: payload decoding and request encoding
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, Bridge, ClientConfig, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and configuration.
    pub fn new(driver: D, config: ClientConfig) -> Self {
        Self { driver, app: App::new(config), bridge: Bridge::new() }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Polls for input from the driver and applies it to the App
    /// 2. Drains payloads received from the server
    /// 3. Feeds decoded events to the App
    /// 4. Sends requests the App produced through the driver
    ///
    /// A failed connection is reported to the App and does not end the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        self.connect().await;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        while self.driver.is_connected() {
            let Some(event) = self.driver.recv().await else {
                break;
            };
            let events = self.bridge.handle_transport(event);
            if self.process_app_events(events).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect { .. } => self.connect().await,
                    AppAction::Send(_) => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                        pending_actions.extend(self.send_outgoing().await);
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_app_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions synchronously (for use in sync contexts).
    ///
    /// Requests are queued on the bridge; the caller flushes them.
    fn process_actions_sync(&mut self, actions: Vec<AppAction>) {
        for action in actions {
            match action {
                AppAction::Render => {
                    if let Err(e) = self.driver.render(&self.app) {
                        tracing::warn!("Failed to render: {:?}", e);
                    }
                },
                AppAction::Send(_) => {
                    let events = self.bridge.process_app_action(action);
                    if !events.is_empty() {
                        tracing::warn!("Dropping events in sync context: {:?}", events);
                    }
                },
                AppAction::Quit | AppAction::Connect { .. } => {
                    tracing::warn!("Unexpected action in sync context: {:?}", action);
                },
            }
        }
    }

    /// Connect to the configured server.
    async fn connect(&mut self) {
        let actions = self.app.handle(AppEvent::Connecting);
        self.process_actions_sync(actions);

        let url = self.app.config().server_url.clone();
        let event = match self.driver.connect(&url).await {
            Ok(()) => {
                tracing::info!(%url, "Connected");
                AppEvent::Connected
            },
            Err(e) => {
                tracing::warn!("Failed to connect to {}: {:?}", url, e);
                AppEvent::TransportFailed { message: e.to_string() }
            },
        };

        let actions = self.app.handle(event);
        self.process_actions_sync(actions);
        let actions = self.send_outgoing().await;
        self.process_actions_sync(actions);
    }

    /// Send all pending outgoing payloads to the server.
    ///
    /// Write failures are reported to the App; returns the actions it produced.
    async fn send_outgoing(&mut self) -> Vec<AppAction> {
        let payloads = self.bridge.take_outgoing();
        if payloads.is_empty() {
            return vec![];
        }

        if !self.driver.is_connected() {
            tracing::warn!("Dropping {} outgoing payloads: not connected", payloads.len());
            self.app.set_status("Not connected");
            return vec![AppAction::Render];
        }

        for text in payloads {
            if let Err(e) = self.driver.send_text(text).await {
                tracing::warn!("Failed to send payload: {:?}", e);
                return self.app.handle(AppEvent::TransportFailed { message: e.to_string() });
            }
        }
        vec![]
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
