//! Connection registry for broadcast fan-out
//!
//! Tracks every live WebSocket connection eligible to receive state
//! broadcasts. Each entry holds the sending half of that connection's
//! outbound queue; the connection's writer task drains the other half into
//! the socket. The registry enforces the client capacity limit and hands the
//! broadcaster a defensive copy of the sender list, so membership can change
//! while a fan-out is in flight.

use log::info;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::Message;

/// Live connections indexed by their server-assigned id.
pub struct ConnectionRegistry {
    /// Outbound queue handles, one per connection
    connections: HashMap<u32, UnboundedSender<Message>>,
    /// Next available connection id
    next_id: u32,
    /// Maximum number of concurrent connections allowed
    max_clients: usize,
}

impl ConnectionRegistry {
    /// Creates an empty registry with the given capacity limit. Connection
    /// ids start from 1 and increment for each registration.
    pub fn new(max_clients: usize) -> Self {
        Self {
            connections: HashMap::new(),
            next_id: 1,
            max_clients,
        }
    }

    /// Registers a connection and returns its id, or `None` if the server is
    /// at capacity.
    pub fn add(&mut self, sender: UnboundedSender<Message>) -> Option<u32> {
        if self.connections.len() >= self.max_clients {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.connections.insert(id, sender);
        info!("Connection {} registered", id);

        Some(id)
    }

    /// Removes a connection. Returns true if it was still present.
    ///
    /// Both the reader and writer teardown paths call this; only the first
    /// call finds anything to remove.
    pub fn remove(&mut self, id: u32) -> bool {
        if self.connections.remove(&id).is_some() {
            info!("Connection {} removed", id);
            true
        } else {
            false
        }
    }

    /// Snapshot of the current members for one broadcast pass.
    pub fn senders(&self) -> Vec<(u32, UnboundedSender<Message>)> {
        self.connections
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect()
    }

    /// Returns the number of currently registered connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
