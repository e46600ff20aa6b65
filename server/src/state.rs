//! Shared-exclusion boundary around the authoritative game state

use shared::GameState;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cheaply cloneable handle to the single authoritative [`GameState`].
///
/// Every read and write in the server goes through this boundary: the
/// physics tick and the per-connection command handlers mutate through
/// [`apply`](SharedState::apply), the broadcaster reads through
/// [`snapshot`](SharedState::snapshot). At most one mutation runs at a time
/// and a snapshot never observes a half-applied one.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<RwLock<GameState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(GameState::new())),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> GameState {
        self.inner.read().await.clone()
    }

    /// Runs `f` with exclusive access to the state.
    pub async fn apply<F>(&self, f: F)
    where
        F: FnOnce(&mut GameState),
    {
        let mut state = self.inner.write().await;
        f(&mut state);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
