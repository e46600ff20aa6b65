//! WebSocket listener and per-connection command ingestion

use crate::registry::ConnectionRegistry;
use crate::state::SharedState;
use futures_util::{SinkExt, StreamExt};
use log::{info, warn};
use shared::ClientMessage;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Accept loop. Every inbound TCP stream gets its own task for the WebSocket
/// handshake and command ingestion, so one bad connection never stalls the
/// rest.
pub async fn run(
    listener: TcpListener,
    state: SharedState,
    registry: Arc<RwLock<ConnectionRegistry>>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tokio::spawn(handle_connection(
                    stream,
                    addr,
                    state.clone(),
                    Arc::clone(&registry),
                ));
            }
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        }
    }
}

/// Runs one connection from handshake to teardown.
///
/// The socket is split so a writer task can drain the outbound queue while
/// the read loop ingests commands. Either side exiting removes the
/// connection from the registry; removal is idempotent, so whichever path
/// tears down first wins.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: SharedState,
    registry: Arc<RwLock<ConnectionRegistry>>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed for {}: {}", addr, e);
            return;
        }
    };

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    let id = {
        let mut registry = registry.write().await;
        match registry.add(outbound_tx) {
            Some(id) => id,
            None => {
                warn!("Rejecting {}: server full", addr);
                return;
            }
        }
    };
    info!("New client connected: {} (connection {})", addr, id);

    let (mut ws_sink, mut ws_source) = ws_stream.split();

    // Writer: outbound queue into the socket. A write failure closes the
    // connection from this side.
    let writer_registry = Arc::clone(&registry);
    tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = ws_sink.send(message).await {
                warn!("Write error on connection {}: {}", id, e);
                writer_registry.write().await.remove(id);
                break;
            }
        }
    });

    // Reader: decode commands until the client closes, the transport errors,
    // or the payload is anything but a valid move. Malformed input is fatal
    // to the connection, not tolerated.
    while let Some(frame) = ws_source.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Move { paddle, direction }) => {
                    state.apply(|game| game.move_paddle(paddle, direction)).await;
                }
                Err(e) => {
                    warn!("Invalid command on connection {}: {}", id, e);
                    break;
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(other) => {
                warn!(
                    "Unexpected frame on connection {}: {} bytes of non-text data",
                    id,
                    other.len()
                );
                break;
            }
            Err(e) => {
                warn!("Read error on connection {}: {}", id, e);
                break;
            }
        }
    }

    // Dropping the registry entry closes the outbound queue, which ends the
    // writer task and with it the socket.
    registry.write().await.remove(id);
    info!("Client disconnected: {} (connection {})", addr, id);
}
