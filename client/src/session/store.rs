//! # Token Persistence
//!
//! Where the session token survives restarts. [`FileTokenStore`] keeps it
//! under the `@lifit:token` key inside a small JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::core::error::{AppError, Result};

/// Key the token is stored under
pub const TOKEN_KEY: &str = "@lifit:token";

/// Persistent backing for the session token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, token: &str) -> Result<()>;
    /// Delete the token key. Removing an absent key is not an error.
    async fn remove(&self) -> Result<()>;
}

/// JSON key/value file, e.g. `{"@lifit:token": "eyJ..."}`.
///
/// Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(format!("{} is not a valid token file: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(TOKEN_KEY).filter(|t| !t.is_empty()))
    }

    async fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), "Token persisted");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        let mut entries = self.read_entries().await?;
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), "Token removed from disk");
        Ok(())
    }
}

/// Process-local store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Current persisted value, without going through the async trait
    pub fn peek(&self) -> Option<String> {
        self.token.read().clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.peek())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}
