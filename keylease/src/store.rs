//! Store adapter trait for lock backends.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::StoreError;

/// The atomic primitives the lock depends on from a key-value backend.
///
/// Implementations must be safe for concurrent use: one store instance is
/// shared by every acquirer and renewal task in the process.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Atomically create the entry with the given TTL if the key is absent.
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` if the entry was created, `Ok(false)` if the key
    /// is already held by another owner (contention), or an error if the
    /// backend call failed.
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    /// Reset the entry's TTL. Refreshing an absent key is a no-op.
    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Delete the entry. Deleting an absent key is a no-op, not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Connectivity probe, issued once at locker construction.
    async fn ping(&self) -> Result<(), StoreError>;
}
