//! Redis cache provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use redis::AsyncCommands;
use tracing::warn;

use recordhub_core::result::AppResult;
use recordhub_core::traits::cache::{CacheLookup, CacheProvider};

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    /// Redis client.
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

/// `SETEX` rejects a zero expiry; round sub-second TTLs up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<CacheLookup> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<Vec<u8>> = self
            .client
            .bounded(conn.get(&full_key))
            .await
            .inspect_err(|e| warn!(key, error = %e, "Redis GET failed"))?;

        Ok(match result {
            Some(value) => CacheLookup::Found(Bytes::from(value)),
            None => CacheLookup::NotFound,
        })
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = self
            .client
            .bounded(conn.set_ex(&full_key, &value[..], ttl_seconds(ttl)))
            .await
            .inspect_err(|e| warn!(key, error = %e, "Redis SETEX failed"))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = self
            .client
            .bounded(conn.del(&full_key))
            .await
            .inspect_err(|e| warn!(key, error = %e, "Redis DEL failed"))?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client.ping().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordhub_core::config::cache::RedisCacheConfig;

    #[test]
    fn test_ttl_rounds_up_to_one_second() {
        assert_eq!(ttl_seconds(Duration::from_millis(200)), 1);
        assert_eq!(ttl_seconds(Duration::from_secs(600)), 600);
    }

    async fn live_provider() -> RedisCacheProvider {
        let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
        let config = RedisCacheConfig {
            url,
            pool_size: 2,
            key_prefix: format!("recordhub-test:{}:", std::process::id()),
            ..RedisCacheConfig::default()
        };
        RedisCacheProvider::new(RedisClient::connect(&config).await.unwrap())
    }

    #[tokio::test]
    #[ignore = "requires a live redis at REDIS_URL"]
    async fn test_live_contract() {
        let provider = live_provider().await;
        let ttl = Duration::from_secs(30);

        assert_eq!(
            provider.get("never-written").await.unwrap(),
            CacheLookup::NotFound
        );

        provider
            .set("k", Bytes::from_static(b"\x00\xffpayload"), ttl)
            .await
            .unwrap();
        assert_eq!(
            provider.get("k").await.unwrap(),
            CacheLookup::Found(Bytes::from_static(b"\x00\xffpayload"))
        );

        provider.delete("k").await.unwrap();
        provider.delete("k").await.unwrap();
        assert_eq!(provider.get("k").await.unwrap(), CacheLookup::NotFound);

        assert!(provider.health_check().await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires a live redis at REDIS_URL"]
    async fn test_live_empty_payload_is_found() {
        let provider = live_provider().await;
        provider
            .set("empty", Bytes::new(), Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(
            provider.get("empty").await.unwrap(),
            CacheLookup::Found(Bytes::new())
        );
        provider.delete("empty").await.unwrap();
    }
}
