//! JSON file session store.

use std::{
    fs as std_fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::{fs, task};

use super::{SessionSnapshot, SessionStore, SessionStoreError};

/// Stores the session as one JSON document with `cart` and `orderHistory` keys.
///
/// Each save is written to its own temporary file beside the target and then
/// renamed over it, so readers only ever see a complete document.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), SessionStoreError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std_fs::create_dir_all(dir)?;

    let mut staging = NamedTempFile::new_in(dir)?;

    staging.write_all(bytes)?;
    staging.as_file().sync_all()?;
    staging.persist(path).map_err(|error| error.error)?;

    Ok(())
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self) -> Result<SessionSnapshot, SessionStoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(SessionSnapshot::default()),
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let path = self.path.clone();

        task::spawn_blocking(move || write_replacing(&path, &bytes))
            .await
            .map_err(io::Error::other)?
    }
}
