//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use tracing::trace;

use recordhub_core::config::cache::MemoryCacheConfig;
use recordhub_core::result::AppResult;
use recordhub_core::traits::cache::{CacheLookup, CacheProvider};

/// In-memory cache provider using moka.
///
/// Every entry shares one time-to-live fixed at construction; the per-call
/// TTL passed to [`CacheProvider::set`] is not applied.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Bytes>,
    /// Global TTL applied to all entries.
    time_to_live: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let time_to_live = Duration::from_secs(config.time_to_live_seconds);
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(time_to_live)
            .build();

        Self {
            cache,
            time_to_live,
        }
    }

    /// The TTL every entry is stored with.
    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<CacheLookup> {
        Ok(match self.cache.get(key).await {
            Some(value) => CacheLookup::Found(value),
            None => CacheLookup::NotFound,
        })
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> AppResult<()> {
        if ttl != self.time_to_live {
            trace!(key, ?ttl, global_ttl = ?self.time_to_live, "Per-entry TTL ignored by embedded cache");
        }
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config)
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let provider = make_provider();
        let result = provider.get("never-written").await.unwrap();
        assert_eq!(result, CacheLookup::NotFound);
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", Bytes::from_static(b"value1"), Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, CacheLookup::Found(Bytes::from_static(b"value1")));
    }

    #[tokio::test]
    async fn test_empty_payload_is_found() {
        let provider = make_provider();
        provider
            .set("empty", Bytes::new(), Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("empty").await.unwrap();
        assert_eq!(val, CacheLookup::Found(Bytes::new()));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let provider = make_provider();
        let ttl = Duration::from_secs(60);
        provider.set("k", Bytes::from_static(b"a"), ttl).await.unwrap();
        provider.set("k", Bytes::from_static(b"b"), ttl).await.unwrap();
        let val = provider.get("k").await.unwrap();
        assert_eq!(val, CacheLookup::Found(Bytes::from_static(b"b")));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", Bytes::from_static(b"value2"), Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, CacheLookup::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let provider = make_provider();
        assert!(provider.delete("nothing-here").await.is_ok());
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let provider = make_provider();
        let data = serde_json::json!({"name": "test", "count": 42});
        provider
            .set_json("json_key", &data, Duration::from_secs(60))
            .await
            .unwrap();
        let result: Option<serde_json::Value> = provider.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_corrupt_json_is_an_error() {
        let provider = make_provider();
        provider
            .set("bad", Bytes::from_static(b"{not json"), Duration::from_secs(60))
            .await
            .unwrap();
        let result: AppResult<Option<serde_json::Value>> = provider.get_json("bad").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
