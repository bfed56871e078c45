//! In-memory lock store.
//!
//! Backs single-process deployments and deterministic tests. Expiry is
//! tracked against `tokio::time::Instant`, so a paused test clock drives
//! it exactly.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::LockStore;

/// In-memory implementation of [`LockStore`].
#[derive(Clone, Default)]
pub struct MemoryLockStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

#[derive(Clone)]
struct Entry {
    value: String,
    expires_at: tokio::time::Instant,
}

impl Entry {
    fn expired(&self) -> bool {
        tokio::time::Instant::now() >= self.expires_at
    }
}

impl MemoryLockStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a live entry exists for the key.
    pub async fn exists(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).is_some_and(|entry| !entry.expired())
    }

    /// Get the stored value for a live entry, if any.
    pub async fn value_of(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.expired())
            .map(|entry| entry.value.clone())
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.expired()) {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: tokio::time::Instant::now() + ttl,
            },
        );
        Ok(true)
    }

    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            if !entry.expired() {
                entry.expires_at = tokio::time::Instant::now() + ttl;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
