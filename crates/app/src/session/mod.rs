//! Session persistence.
//!
//! The cart and order history are saved after every change so a session can
//! be picked up again later. Saving is best effort: the in-memory state stays
//! authoritative when a write fails.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiffin::{cart::Cart, orders::OrderHistory};
use tracing::warn;

mod file;
mod memory;

pub use file::JsonFileSessionStore;
pub use memory::InMemorySessionStore;

/// Everything persisted for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub cart: Cart,

    #[serde(default, rename = "orderHistory")]
    pub order_history: OrderHistory,
}

/// Errors raised by a session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Reading or writing the backing storage failed.
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored state could not be encoded or decoded.
    #[error("session state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, or an empty one when nothing was saved yet.
    async fn load(&self) -> Result<SessionSnapshot, SessionStoreError>;

    /// Replace the stored session.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError>;
}

/// Load whatever `store` holds, falling back to an empty session.
///
/// A store that cannot be read is logged rather than reported.
pub async fn load_or_default(store: &dyn SessionStore) -> SessionSnapshot {
    match store.load().await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            warn!(%error, "failed to load saved session; starting empty");
            SessionSnapshot::default()
        }
    }
}
