//! Lock options and validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{LockError, Result};

/// Validated lock options.
///
/// Use [`LockOptions::builder`] for programmatic construction, or
/// [`RawLockOptions`] when the values come from a configuration file.
#[derive(Debug, Clone)]
pub struct LockOptions {
    /// Namespace prepended to every lock key.
    pub key_prefix: String,
    /// TTL granted to a store entry. The renewal loop refreshes it after
    /// two-thirds of this duration elapses.
    pub lease_duration: Duration,
    /// Extra acquisition attempts after the first one. Zero means try
    /// exactly once.
    pub max_acquire_retries: u32,
    /// Wait between acquisition attempts. Zero means retry immediately.
    pub retry_delay: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            key_prefix: "keylease:".to_string(),
            lease_duration: Duration::from_secs(30),
            max_acquire_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl LockOptions {
    /// Create a builder.
    pub fn builder() -> LockOptionsBuilder {
        LockOptionsBuilder::new()
    }

    /// Validate the options.
    ///
    /// Negative retries and delays are unrepresentable here, so only the
    /// lease duration and key prefix can be rejected.
    pub fn validate(&self) -> Result<()> {
        if self.lease_duration.is_zero() {
            return Err(LockError::InvalidLeaseDuration);
        }
        if self.key_prefix.is_empty() {
            return Err(LockError::InvalidKeyPrefix);
        }
        Ok(())
    }

    /// Interval between renewal ticks: two-thirds of the lease duration,
    /// leaving slack for one missed tick.
    pub(crate) fn renewal_interval(&self) -> Duration {
        self.lease_duration / 3 * 2
    }
}

/// Builder for lock options.
#[derive(Default)]
pub struct LockOptionsBuilder {
    options: LockOptions,
}

impl LockOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: LockOptions::default(),
        }
    }

    /// Set the key prefix.
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.key_prefix = prefix.into();
        self
    }

    /// Set the lease duration.
    pub fn lease_duration(mut self, duration: Duration) -> Self {
        self.options.lease_duration = duration;
        self
    }

    /// Set the number of extra acquisition attempts.
    pub fn max_acquire_retries(mut self, retries: u32) -> Self {
        self.options.max_acquire_retries = retries;
        self
    }

    /// Set the wait between acquisition attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.options.retry_delay = delay;
        self
    }

    /// Validate and build the options.
    pub fn build(self) -> Result<LockOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

/// Configuration-surface lock options.
///
/// Mirrors what a config file supplies: integer seconds and milliseconds,
/// signed so that out-of-range values are caught by [`validate`] with a
/// field-specific error instead of failing deserialization opaquely.
///
/// [`validate`]: RawLockOptions::validate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLockOptions {
    /// Namespace prepended to every lock key.
    pub key_prefix: String,
    /// Lease TTL in seconds.
    pub lease_duration_secs: i64,
    /// Extra acquisition attempts after the first one.
    pub max_acquire_retries: i64,
    /// Wait between acquisition attempts, in milliseconds.
    pub retry_delay_ms: i64,
}

impl Default for RawLockOptions {
    fn default() -> Self {
        Self {
            key_prefix: "keylease:".to_string(),
            lease_duration_secs: 30,
            max_acquire_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl RawLockOptions {
    /// Validate the raw options, reporting the first violated field.
    pub fn validate(&self) -> Result<()> {
        if self.lease_duration_secs <= 0 {
            return Err(LockError::InvalidLeaseDuration);
        }
        if self.max_acquire_retries < 0 {
            return Err(LockError::InvalidMaxRetries);
        }
        if self.retry_delay_ms < 0 {
            return Err(LockError::InvalidRetryDelay);
        }
        if self.key_prefix.is_empty() {
            return Err(LockError::InvalidKeyPrefix);
        }
        Ok(())
    }

    /// Validate and convert into duration-typed [`LockOptions`].
    pub fn into_options(self) -> Result<LockOptions> {
        self.validate()?;
        Ok(LockOptions {
            key_prefix: self.key_prefix,
            lease_duration: Duration::from_secs(self.lease_duration_secs as u64),
            max_acquire_retries: self.max_acquire_retries as u32,
            retry_delay: Duration::from_millis(self.retry_delay_ms as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LockOptions::default();
        assert_eq!(options.key_prefix, "keylease:");
        assert_eq!(options.lease_duration, Duration::from_secs(30));
        assert_eq!(options.max_acquire_retries, 3);
        assert_eq!(options.retry_delay, Duration::from_millis(100));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_renewal_interval_is_two_thirds() {
        let options = LockOptions::builder()
            .lease_duration(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(options.renewal_interval(), Duration::from_secs(20));
    }

    #[test]
    fn test_builder_rejects_zero_lease_duration() {
        let err = LockOptions::builder()
            .lease_duration(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, LockError::InvalidLeaseDuration));
    }

    #[test]
    fn test_builder_rejects_empty_prefix() {
        let err = LockOptions::builder().key_prefix("").build().unwrap_err();
        assert!(matches!(err, LockError::InvalidKeyPrefix));
    }

    #[test]
    fn test_raw_validation_cases() {
        let cases = [
            (
                RawLockOptions {
                    lease_duration_secs: 0,
                    ..Default::default()
                },
                LockError::InvalidLeaseDuration,
            ),
            (
                RawLockOptions {
                    lease_duration_secs: -1,
                    ..Default::default()
                },
                LockError::InvalidLeaseDuration,
            ),
            (
                RawLockOptions {
                    max_acquire_retries: -1,
                    ..Default::default()
                },
                LockError::InvalidMaxRetries,
            ),
            (
                RawLockOptions {
                    retry_delay_ms: -1,
                    ..Default::default()
                },
                LockError::InvalidRetryDelay,
            ),
            (
                RawLockOptions {
                    key_prefix: String::new(),
                    ..Default::default()
                },
                LockError::InvalidKeyPrefix,
            ),
        ];

        for (raw, expected) in cases {
            let err = raw.validate().unwrap_err();
            assert_eq!(
                std::mem::discriminant(&err),
                std::mem::discriminant(&expected),
                "raw options {raw:?} should fail with {expected:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_zero_retries_and_zero_delay_are_valid() {
        let raw = RawLockOptions {
            max_acquire_retries: 0,
            retry_delay_ms: 0,
            ..Default::default()
        };
        let options = raw.into_options().unwrap();
        assert_eq!(options.max_acquire_retries, 0);
        assert_eq!(options.retry_delay, Duration::ZERO);
    }

    #[test]
    fn test_raw_options_from_json() {
        let raw: RawLockOptions = serde_json::from_str(
            r#"{
                "key_prefix": "jobs:",
                "lease_duration_secs": 60,
                "max_acquire_retries": 5,
                "retry_delay_ms": 200
            }"#,
        )
        .unwrap();

        let options = raw.into_options().unwrap();
        assert_eq!(options.key_prefix, "jobs:");
        assert_eq!(options.lease_duration, Duration::from_secs(60));
        assert_eq!(options.max_acquire_retries, 5);
        assert_eq!(options.retry_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_raw_options_missing_fields_use_defaults() {
        let raw: RawLockOptions = serde_json::from_str(r#"{ "key_prefix": "jobs:" }"#).unwrap();
        assert_eq!(raw.lease_duration_secs, 30);
        assert_eq!(raw.max_acquire_retries, 3);
        assert_eq!(raw.retry_delay_ms, 100);
    }
}
