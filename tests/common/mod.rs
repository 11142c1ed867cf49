//! Shared fixtures for the live-Redis integration suite.
//!
//! These tests are `#[ignore]`d by default because they require a reachable
//! Redis instance. Run them explicitly once one is up:
//!
//! ```text
//! MULTILOCK_TEST_REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored
//! ```

use std::sync::Arc;

use multilock::{Multilock, RedisStore, RetryConfig, Store};

pub async fn store() -> Arc<dyn Store> {
    let url = std::env::var("MULTILOCK_TEST_REDIS_URL")
        .unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
    let store = RedisStore::connect(&url)
        .await
        .expect("connect to test redis instance");
    Arc::new(store)
}

pub fn lock(store: Arc<dyn Store>, name: &str) -> Multilock {
    Multilock::new(store, name)
}

pub fn lock_no_retry(store: Arc<dyn Store>, name: &str) -> Multilock {
    Multilock::with_retry(store, name, RetryConfig::with_retry_count(0))
}

/// Delete all four keys for `name` directly through the store adapter,
/// bypassing the `flush` script. Used to give property tests a clean slate
/// without relying on the atomic protocols under test.
pub async fn reset(store: &dyn Store, name: &str) {
    let ks = multilock::Keyspace::new(name);
    for key in ks.all() {
        store.delete(key).await.expect("delete key while resetting fixture");
    }
}
