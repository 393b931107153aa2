//! In-memory session store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{SessionSnapshot, SessionStore, SessionStoreError};

/// Keeps the last saved session in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    snapshot: Mutex<SessionSnapshot>,
}

impl InMemorySessionStore {
    /// Create a store that starts out holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// The last saved session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<SessionSnapshot, SessionStoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();

        Ok(())
    }
}
