//! Chatroom TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local server and log in by hand
//! chatroom-tui
//!
//! # Answer the login prompt automatically and keep a debug log
//! chatroom-tui --server ws://chat.example:9002 --user alice --password pw \
//!     --log-level debug --log-file chatroom.log
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex};

use chatroom_tui::{ClientConfig, Credentials, Runtime, TerminalDriver};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Chatroom terminal UI client
#[derive(Parser, Debug)]
#[command(name = "chatroom-tui")]
#[command(about = "Terminal client for the chatroom WebSocket server")]
#[command(version)]
struct Args {
    /// WebSocket URL of the server
    #[arg(short, long, default_value = chatroom_app::DEFAULT_SERVER_URL)]
    server: String,

    /// Username used to answer the login prompt
    #[arg(short, long, requires = "password")]
    user: Option<String>,

    /// Password used to answer the login prompt
    #[arg(short, long, requires = "user")]
    password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. Without it nothing is logged, since the
    /// terminal belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!("Chatroom client starting");
    tracing::info!("Server {}", args.server);

    let mut config = ClientConfig::new(args.server);
    if let (Some(user), Some(password)) = (args.user, args.password) {
        config = config.with_credentials(Credentials::new(user, password));
    }

    let driver = TerminalDriver::new()?;
    Runtime::new(driver, config).run().await?;

    Ok(())
}
