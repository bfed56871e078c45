//! # keylease-redis
//!
//! Redis store adapter for [`keylease`] distributed locks.
//!
//! Lock entries are plain Redis keys created with `SET NX PX`, refreshed
//! with `PEXPIRE` and removed with `DEL`, so exclusivity rests entirely
//! on Redis's atomic set-if-not-exists.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keylease::Locker;
//! use keylease_redis::{RedisLockStore, RedisStoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisStoreConfig::builder()
//!         .url("redis://localhost:6379")
//!         .build();
//!     let store = Arc::new(RedisLockStore::connect(config).await?);
//!
//!     let locker = Locker::with_defaults(store).await?;
//!     let lease = locker.acquire("nightly-report").await?;
//!
//!     // Critical section.
//!
//!     lease.release().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod store;

pub use config::{RedisStoreConfig, RedisStoreConfigBuilder};
pub use store::RedisLockStore;

// Re-export redis crate for convenience
pub use redis;
