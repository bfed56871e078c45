//! Distributed mutual-exclusion leases over expiring key-value stores.
//!
//! A [`Locker`] acquires a lock by atomically creating a store entry with
//! a TTL. Each successful acquisition hands back a [`Lease`] bound to a
//! background task that refreshes the TTL until the lease is released, so
//! the entry survives critical sections longer than the lease duration
//! while still expiring if the holder dies.
//!
//! ## Features
//!
//! - **Store-agnostic** - any backend with atomic create-if-absent works
//!   through the [`LockStore`] trait; a Redis adapter ships in
//!   `keylease-redis`
//! - **Automatic renewal** - the TTL is refreshed after two-thirds of the
//!   lease elapses, with slack for one missed tick
//! - **Bounded acquisition** - contention is retried a configured number
//!   of times with a fixed delay, then reported as exhaustion
//! - **In-memory backend** - [`MemoryLockStore`] for single-process use
//!   and deterministic tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keylease::{Locker, LockOptions, MemoryLockStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryLockStore::new());
//!
//!     let options = LockOptions::builder()
//!         .key_prefix("jobs:")
//!         .lease_duration(Duration::from_secs(30))
//!         .build()?;
//!     let locker = Locker::new(store, options).await?;
//!
//!     let lease = locker.acquire("nightly-report").await?;
//!
//!     // Critical section; renewal keeps the entry alive.
//!
//!     lease.release().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## With Redis
//!
//! ```rust,ignore
//! use keylease::Locker;
//! use keylease_redis::{RedisLockStore, RedisStoreConfig};
//! use std::sync::Arc;
//!
//! let config = RedisStoreConfig::builder()
//!     .url("redis://localhost:6379")
//!     .build();
//! let store = Arc::new(RedisLockStore::connect(config).await?);
//! let locker = Locker::with_defaults(store).await?;
//! ```
//!
//! This is a best-effort, non-fair lock: under total store unavailability
//! the entry silently expires, so critical sections should be idempotent.
//! It is not a consensus primitive and carries no fencing tokens.

pub mod error;
pub mod locker;
pub mod memory;
pub mod options;
pub mod store;

pub use error::{LockError, Result, StoreError};
pub use locker::{Lease, Locker};
pub use memory::MemoryLockStore;
pub use options::{LockOptions, LockOptionsBuilder, RawLockOptions};
pub use store::LockStore;
