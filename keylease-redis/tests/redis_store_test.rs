//! Integration tests for the Redis lock store.
//!
//! Live-backend tests are disabled by default; run them against a local
//! Redis with: cargo test -p keylease-redis -- --ignored

use keylease::{LockOptions, Locker};
use keylease_redis::{RedisLockStore, RedisStoreConfig};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_connect_fails_fast_on_unreachable_backend() {
    let config = RedisStoreConfig::builder()
        .url("redis://127.0.0.1:1")
        .connect_timeout(Duration::from_millis(500))
        .build();

    assert!(RedisLockStore::connect(config).await.is_err());
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_acquire_and_release_roundtrip() {
    let store = Arc::new(
        RedisLockStore::connect(RedisStoreConfig::default())
            .await
            .unwrap(),
    );

    let options = LockOptions::builder()
        .key_prefix("keylease_test:")
        .lease_duration(Duration::from_secs(5))
        .build()
        .unwrap();
    let locker = Locker::new(store.clone(), options.clone()).await.unwrap();

    let lease = locker.acquire("roundtrip").await.unwrap();

    // A second acquirer contends while the lease is held.
    let contender = Locker::new(store, options).await.unwrap();
    assert!(contender.try_acquire("roundtrip").await.unwrap().is_none());

    lease.release().await.unwrap();

    // The key is free again after release.
    let lease = contender.acquire("roundtrip").await.unwrap();
    lease.release().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_renewal_outlives_lease_duration() {
    let store = Arc::new(
        RedisLockStore::connect(RedisStoreConfig::default())
            .await
            .unwrap(),
    );

    let options = LockOptions::builder()
        .key_prefix("keylease_test:")
        .lease_duration(Duration::from_secs(1))
        .max_acquire_retries(0)
        .build()
        .unwrap();
    let locker = Locker::new(store.clone(), options.clone()).await.unwrap();
    let prober = Locker::new(store, options).await.unwrap();

    let lease = locker.acquire("renewed").await.unwrap();

    // Hold well past the 1s lease; renewal must keep the key alive.
    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(prober.try_acquire("renewed").await.unwrap().is_none());
    }

    lease.release().await.unwrap();
}
