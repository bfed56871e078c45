//! Lock acquisition and lease renewal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{LockError, Result};
use crate::options::LockOptions;
use crate::store::LockStore;

/// Upper bound on a single renewal call so a slow backend cannot wedge
/// the renewal loop past the next tick.
const RENEW_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Distributed lock acquirer.
///
/// Exclusivity is delegated entirely to the store's atomic
/// create-if-absent; no in-process mutex guards the lock itself.
pub struct Locker {
    store: Arc<dyn LockStore>,
    options: LockOptions,
}

impl std::fmt::Debug for Locker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locker")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Locker {
    /// Create a new locker, probing store connectivity once.
    ///
    /// Fails with [`LockError::ConnectFailed`] if the backend is
    /// unreachable, or a validation error if the options are invalid.
    pub async fn new(store: Arc<dyn LockStore>, options: LockOptions) -> Result<Self> {
        options.validate()?;
        if let Err(err) = store.ping().await {
            warn!(error = %err, "lock store unreachable at construction");
            return Err(LockError::ConnectFailed);
        }
        Ok(Self { store, options })
    }

    /// Create a new locker with [`LockOptions::default`].
    pub async fn with_defaults(store: Arc<dyn LockStore>) -> Result<Self> {
        Self::new(store, LockOptions::default()).await
    }

    /// Get the options.
    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// Acquire the lock for a logical key, retrying on contention.
    ///
    /// Retries up to `max_acquire_retries` times with `retry_delay`
    /// between attempts. Backend errors propagate immediately without
    /// retry; only contention is retried. Dropping the returned future
    /// (e.g. from a caller's `select!` or `timeout`) cancels the wait.
    pub async fn acquire(&self, key: &str) -> Result<Lease> {
        let full_key = self.full_key(key);
        let token = Uuid::new_v4().to_string();
        let mut attempts: u32 = 1;

        loop {
            let created = self
                .store
                .create_if_absent(&full_key, &token, self.options.lease_duration)
                .await?;

            if created {
                info!(key = %full_key, "acquired lock");
                return Ok(self.start_lease(full_key));
            }

            if attempts > self.options.max_acquire_retries {
                debug!(key = %full_key, attempts, "lock acquisition exhausted");
                return Err(LockError::AcquireExhausted {
                    key: key.to_string(),
                    attempts,
                });
            }

            debug!(key = %full_key, attempts, "lock contended, retrying");
            tokio::time::sleep(self.options.retry_delay).await;
            attempts += 1;
        }
    }

    /// Try to acquire the lock with a single attempt.
    ///
    /// Returns `Ok(None)` on contention instead of an error.
    pub async fn try_acquire(&self, key: &str) -> Result<Option<Lease>> {
        let full_key = self.full_key(key);
        let token = Uuid::new_v4().to_string();

        let created = self
            .store
            .create_if_absent(&full_key, &token, self.options.lease_duration)
            .await?;

        if created {
            info!(key = %full_key, "acquired lock");
            Ok(Some(self.start_lease(full_key)))
        } else {
            debug!(key = %full_key, "lock already held");
            Ok(None)
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.options.key_prefix, key)
    }

    fn start_lease(&self, full_key: String) -> Lease {
        let (stop_tx, stop_rx) = watch::channel(false);

        tokio::spawn(renew_loop(
            Arc::clone(&self.store),
            full_key.clone(),
            self.options.lease_duration,
            self.options.renewal_interval(),
            stop_rx,
        ));

        Lease {
            key: full_key,
            store: Arc::clone(&self.store),
            stop: stop_tx,
            released: AtomicBool::new(false),
        }
    }
}

/// Keeps the store entry alive while the lease is held.
///
/// The first refresh fires one full interval after acquisition. A failed
/// or timed-out refresh is skipped, never escalated: the entry may still
/// be live and a later tick can land before the TTL lapses. No store call
/// is issued once the stop signal arrives.
async fn renew_loop(
    store: Arc<dyn LockStore>,
    key: String,
    lease_duration: Duration,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let start = tokio::time::Instant::now() + interval;
    let mut ticker = tokio::time::interval_at(start, interval);

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => {
                debug!(key = %key, "renewal loop stopped");
                return;
            }
            _ = ticker.tick() => {
                match tokio::time::timeout(RENEW_CALL_TIMEOUT, store.refresh_expiry(&key, lease_duration)).await {
                    Ok(Ok(())) => debug!(key = %key, "lease renewed"),
                    Ok(Err(err)) => warn!(key = %key, error = %err, "lease renewal failed, skipping tick"),
                    Err(_) => warn!(key = %key, "lease renewal timed out, skipping tick"),
                }
            }
        }
    }
}

/// A held distributed lock, bound to one background renewal task.
///
/// Dropping the lease stops renewal and deletes the entry best-effort;
/// call [`Lease::release`] to observe the delete's outcome.
pub struct Lease {
    key: String,
    store: Arc<dyn LockStore>,
    stop: watch::Sender<bool>,
    released: AtomicBool,
}

impl std::fmt::Debug for Lease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease")
            .field("key", &self.key)
            .field("released", &self.released.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl Lease {
    /// Get the fully-qualified lock key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the lock.
    ///
    /// Stops the renewal task first, then deletes the store entry,
    /// surfacing any delete error. Releasing an already-released lease is
    /// a no-op returning `Ok`. Even if the delete fails, the entry
    /// expires via its TTL.
    pub async fn release(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        // Renewal must stop before the delete so a late tick cannot
        // refresh a key that is being removed.
        let _ = self.stop.send(true);

        self.store.delete(&self.key).await?;
        debug!(key = %self.key, "released lock");
        Ok(())
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }

        let _ = self.stop.send(true);

        // Best effort delete on drop; TTL expiry covers the failure case.
        let store = Arc::clone(&self.store);
        let key = std::mem::take(&mut self.key);
        tokio::spawn(async move {
            if let Err(err) = store.delete(&key).await {
                warn!(key = %key, error = %err, "best-effort release on drop failed");
            }
        });
    }
}
