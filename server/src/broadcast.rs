//! Per-tick state fan-out

use crate::registry::ConnectionRegistry;
use crate::state::SharedState;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;

/// Sends one consistent snapshot of the game state to every registered
/// connection.
///
/// The snapshot is taken and serialized exactly once, so every client sees
/// the same payload even when a command lands mid-broadcast. The fan-out
/// runs over a defensive copy of the sender list; a connection whose
/// outbound queue has closed is pruned after the pass, and a failure on one
/// connection never blocks delivery to the rest. Nothing is retried.
pub async fn broadcast_state(state: &SharedState, registry: &Arc<RwLock<ConnectionRegistry>>) {
    let snapshot = state.snapshot().await;
    let payload = match serde_json::to_string(&snapshot) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize game state: {}", e);
            return;
        }
    };

    let targets = {
        let registry = registry.read().await;
        registry.senders()
    };

    let mut dead = Vec::new();
    for (id, sender) in targets {
        if sender.send(Message::Text(payload.clone())).is_err() {
            warn!("Dropping connection {}: outbound queue closed", id);
            dead.push(id);
        }
    }

    if !dead.is_empty() {
        let mut registry = registry.write().await;
        for id in dead {
            registry.remove(id);
        }
    }
}
