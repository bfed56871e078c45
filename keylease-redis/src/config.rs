//! Redis store configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Redis lock store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis URL (redis://host:port or rediss://host:port for TLS).
    pub url: String,
    /// Timeout for establishing the connection and the construction-time
    /// ping.
    #[serde(with = "duration_secs", default = "default_connect_timeout")]
    pub connect_timeout: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl RedisStoreConfig {
    /// Create a new configuration.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> RedisStoreConfigBuilder {
        RedisStoreConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> RedisStoreConfigBuilder {
        let mut builder = RedisStoreConfigBuilder::new();

        if let Ok(url) = std::env::var("REDIS_URL") {
            builder = builder.url(url);
        }

        if let Ok(timeout) = std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse()
        {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        builder
    }
}

/// Builder for Redis store configuration.
#[derive(Default)]
pub struct RedisStoreConfigBuilder {
    config: RedisStoreConfig,
}

impl RedisStoreConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RedisStoreConfig::default(),
        }
    }

    /// Set the Redis URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RedisStoreConfig {
        self.config
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RedisStoreConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder() {
        let config = RedisStoreConfig::builder()
            .url("redis://cache.internal:6380")
            .connect_timeout(Duration::from_secs(2))
            .build();

        assert_eq!(config.url, "redis://cache.internal:6380");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }
}
