//! Lock error types.

use thiserror::Error;

/// Result type for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

/// Errors reported by a lock store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend command error.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Store call timed out.
    #[error("Store operation timed out")]
    Timeout,
}

/// Lock errors.
#[derive(Debug, Error)]
pub enum LockError {
    /// The store was unreachable at construction time.
    #[error("Failed to connect to the lock store")]
    ConnectFailed,

    /// All acquisition attempts found the key held by another owner.
    ///
    /// This signals contention, not a backend failure. Callers may retry
    /// at a higher level or pick a different key.
    #[error("Failed to acquire lock for {key:?} after {attempts} attempts")]
    AcquireExhausted {
        /// Logical key the acquisition targeted.
        key: String,
        /// Attempts made, including the first.
        attempts: u32,
    },

    /// Lease duration must be positive.
    #[error("Invalid lease duration: must be positive")]
    InvalidLeaseDuration,

    /// Max acquire retries must not be negative.
    #[error("Invalid max acquire retries: must not be negative")]
    InvalidMaxRetries,

    /// Retry delay must not be negative.
    #[error("Invalid retry delay: must not be negative")]
    InvalidRetryDelay,

    /// Key prefix must not be empty.
    #[error("Invalid key prefix: must not be empty")]
    InvalidKeyPrefix,

    /// Underlying store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LockError {
    /// Check whether this error is acquisition exhaustion (contention).
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::AcquireExhausted { .. })
    }
}
