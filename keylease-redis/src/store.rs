//! Redis-backed lock store.

use async_trait::async_trait;
use keylease::store::LockStore;
use keylease::StoreError;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::info;

use crate::config::RedisStoreConfig;

/// [`LockStore`] implementation over a Redis connection manager.
///
/// The connection manager multiplexes one connection and is cheap to
/// clone, so a single store instance serves every locker and renewal
/// task in the process.
#[derive(Clone)]
pub struct RedisLockStore {
    conn: ConnectionManager,
}

impl RedisLockStore {
    /// Connect to Redis and verify reachability with a bounded ping.
    pub async fn connect(config: RedisStoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { conn };
        tokio::time::timeout(config.connect_timeout, store.ping())
            .await
            .map_err(|_| StoreError::Timeout)??;

        info!(url = %config.url, "connected to redis lock store");
        Ok(store)
    }

    /// Wrap an existing connection manager.
    pub fn from_connection(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();

        // SET NX PX is the atomic create-if-absent-with-expiry primitive.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_err)?;

        Ok(reply.is_some())
    }

    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        // PEXPIRE returns 0 for an absent key; that is not an error here,
        // the TTL safety net has simply already fired.
        let _touched: i64 = redis::cmd("PEXPIRE")
            .arg(key)
            .arg(ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_err)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        let _deleted: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_err)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(())
    }
}

fn map_redis_err(err: redis::RedisError) -> StoreError {
    StoreError::Backend(err.to_string())
}
