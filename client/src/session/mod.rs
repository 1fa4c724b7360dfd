//! # Session Holder
//!
//! The bearer token lives in two places: an in-memory cache read by every
//! outgoing request, and a [`TokenStore`] that survives restarts.
//!
//! ## Ordering
//!
//! Writes hit memory first, synchronously, and only then await the store.
//! A request dispatched while the store write is still pending already sees
//! the new token. Store failures are logged and returned but never roll back
//! the in-memory value.
//!
//! ```text
//! login ──► set_token(Some(t)) ──► memory = t ──► store.save(t)
//! 401   ──► clear()            ──► memory = ∅ ──► store.remove()
//! start ──► restore()          ──► memory = store.load()
//! ```
//!
//! After an explicit clear the store is no longer consulted by
//! [`SessionHolder::resolve_token`] until a new token is set or restored. A
//! `remove()` that failed cannot bring the old token back.

pub mod store;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::core::error::Result;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

#[derive(Default)]
struct TokenSlot {
    token: Option<String>,
    /// Set by an explicit clear; blocks the store fallback
    cleared: bool,
}

/// Shared handle to the current session token.
pub struct SessionHolder {
    slot: RwLock<TokenSlot>,
    store: Arc<dyn TokenStore>,
}

impl SessionHolder {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            slot: RwLock::new(TokenSlot::default()),
            store,
        }
    }

    /// Holder backed by a fresh [`MemoryTokenStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Load the persisted token into memory. Returns whether a session exists.
    pub async fn restore(&self) -> Result<bool> {
        let persisted = self.store.load().await.map_err(|e| {
            warn!(error = %e, "Failed to read persisted session token");
            e
        })?;

        let authenticated = persisted.is_some();
        *self.slot.write() = TokenSlot {
            token: persisted,
            cleared: false,
        };

        info!(authenticated, "Session restored");
        Ok(authenticated)
    }

    /// Current in-memory token
    pub fn get_token(&self) -> Option<String> {
        self.slot.read().token.clone()
    }

    /// Replace the token. `None` removes the persisted key.
    pub async fn set_token(&self, token: Option<String>) -> Result<()> {
        let token = token.filter(|t| !t.is_empty());
        *self.slot.write() = TokenSlot {
            cleared: token.is_none(),
            token: token.clone(),
        };

        let persisted = match token {
            Some(token) => self.store.save(&token).await,
            None => self.store.remove().await,
        };

        if let Err(e) = &persisted {
            warn!(error = %e, "Session token persistence failed; memory copy kept");
        }
        persisted
    }

    /// Drop the session from memory and from the store
    pub async fn clear(&self) -> Result<()> {
        debug!("Clearing session token");
        self.set_token(None).await
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().token.is_some()
    }

    /// Token for an outgoing request.
    ///
    /// When memory is empty, waits `retry_delay` once and looks again: memory
    /// first, then the store. A token found in the store is cached back into
    /// memory. The store is skipped once the session has been cleared.
    /// Returns `None` when nothing usable is found.
    pub async fn resolve_token(&self, retry_delay: Duration) -> Option<String> {
        if let Some(token) = self.get_token() {
            return Some(token);
        }

        if !retry_delay.is_zero() {
            tokio::time::sleep(retry_delay).await;
        }

        {
            let slot = self.slot.read();
            if slot.token.is_some() || slot.cleared {
                return slot.token.clone();
            }
        }

        match self.store.load().await {
            Ok(Some(token)) => {
                let mut slot = self.slot.write();
                if slot.cleared {
                    debug!("Session cleared while reading the store; ignoring persisted token");
                    return None;
                }
                debug!("Token picked up from persistent store on retry");
                Some(slot.token.get_or_insert(token).clone())
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Token store unreadable; sending request without token");
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHolder")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
