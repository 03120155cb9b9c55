//! WebSocket transport for the client.
//!
//! Provides [`Connection`] which bridges a WebSocket to tokio channels. This is
//! a thin layer that only moves text frames; decoding stays in the sans-IO
//! [`chatroom_app::Bridge`].

use chatroom_app::TransportEvent;
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const CHANNEL_CAPACITY: usize = 32;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Handle to an open WebSocket.
///
/// Payloads are sent and received via the channels; an internal task handles
/// the socket I/O.
pub struct Connection {
    /// Send text payloads to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive payloads and connection changes from the server.
    pub from_server: mpsc::Receiver<TransportEvent>,
    abort_handle: tokio::task::AbortHandle,
}

impl Connection {
    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Open a WebSocket to `url`.
///
/// # Errors
///
/// Returns [`TransportError::Connection`] if the handshake fails.
pub async fn connect(url: &str) -> Result<Connection, TransportError> {
    let (socket, _response) =
        connect_async(url).await.map_err(|e| TransportError::Connection(e.to_string()))?;
    tracing::info!(url, "WebSocket connected");

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (from_server_tx, from_server_rx) = mpsc::channel::<TransportEvent>(CHANNEL_CAPACITY);

    let handle = tokio::spawn(run_connection(socket, to_server_rx, from_server_tx));

    Ok(Connection {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
///
/// Ends after reporting exactly one [`TransportEvent::Closed`] or
/// [`TransportEvent::Error`], or when the client drops its sender.
async fn run_connection(
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<TransportEvent>,
) {
    let (mut write, mut read) = socket.split();

    let last = loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(text) = outgoing else {
                    let _ = write.close().await;
                    return;
                };
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    break TransportEvent::Error(TransportError::Stream(e.to_string()).to_string());
                }
            }

            incoming = read.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let event = TransportEvent::Text(text.as_str().to_owned());
                        if from_server.send(event).await.is_err() {
                            return;
                        }
                    },
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "Server closed the connection");
                        break TransportEvent::Closed;
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read failed: {:?}", e);
                        break TransportEvent::Error(TransportError::Stream(e.to_string()).to_string());
                    },
                    None => break TransportEvent::Closed,
                }
            }
        }
    };

    let _ = from_server.send(last).await;
}
