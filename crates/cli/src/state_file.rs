//! File-backed flag store.
//!
//! The CLI keeps the login flag in a small JSON object on disk, the way a
//! browser keeps it in local storage. A missing file is an empty store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use falcon_core::FlagStore;
use thiserror::Error;

/// Default location of the state file.
pub const DEFAULT_STATE_FILE: &str = ".falcon-session.json";

/// Errors reading or writing the state file.
#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("State file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// [`FlagStore`] persisted as a JSON object of strings.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StateFileError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, flags: &BTreeMap<String, String>) -> Result<(), StateFileError> {
        if flags.is_empty() {
            return match tokio::fs::remove_file(&self.path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(flags)?).await?;
        Ok(())
    }
}

impl FlagStore for FileFlagStore {
    type Error = StateFileError;

    async fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.load().await?.remove(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut flags = self.load().await?;
        flags.insert(key.to_owned(), value.to_owned());
        self.save(&flags).await
    }

    async fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let mut flags = self.load().await?;
        if flags.remove(key).is_some() {
            self.save(&flags).await?;
        }
        Ok(())
    }
}
