//! Cache manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use recordhub_core::config::cache::CacheConfig;
use recordhub_core::result::AppResult;
use recordhub_core::traits::cache::{CacheLookup, CacheProvider};

/// Which backend a [`CacheManager`] routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// In-process moka cache, visible to this node only.
    Embedded,
    /// Redis, visible to every node in the deployment.
    Shared,
}

/// Cache manager that wraps the configured cache provider.
///
/// The backend is chosen once at construction and never changes. Values
/// pass through untouched; the manager only routes.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner cache provider.
    inner: Arc<dyn CacheProvider>,
    /// The selected mode.
    mode: CacheMode,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    ///
    /// In shared mode this opens the connection pool and pings the server;
    /// an error here must stop the process from starting.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        if config.distributed_mode {
            Self::shared(config).await
        } else {
            Self::embedded(config)
        }
    }

    #[cfg(feature = "redis-backend")]
    async fn shared(config: &CacheConfig) -> AppResult<Self> {
        info!("Initializing Redis cache provider");
        let client = crate::redis::RedisClient::connect(&config.redis).await?;
        let provider = crate::redis::RedisCacheProvider::new(client);
        Ok(Self {
            inner: Arc::new(provider),
            mode: CacheMode::Shared,
        })
    }

    #[cfg(not(feature = "redis-backend"))]
    async fn shared(_config: &CacheConfig) -> AppResult<Self> {
        Err(recordhub_core::error::AppError::configuration(
            "distributed_mode requires the 'redis-backend' feature",
        ))
    }

    #[cfg(feature = "memory")]
    fn embedded(config: &CacheConfig) -> AppResult<Self> {
        info!(
            max_capacity = config.memory.max_capacity,
            ttl_seconds = config.memory.time_to_live_seconds,
            "Initializing in-memory cache provider"
        );
        let provider = crate::memory::MemoryCacheProvider::new(&config.memory);
        Ok(Self {
            inner: Arc::new(provider),
            mode: CacheMode::Embedded,
        })
    }

    #[cfg(not(feature = "memory"))]
    fn embedded(_config: &CacheConfig) -> AppResult<Self> {
        Err(recordhub_core::error::AppError::configuration(
            "embedded cache requires the 'memory' feature",
        ))
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CacheProvider>, mode: CacheMode) -> Self {
        Self {
            inner: provider,
            mode,
        }
    }

    /// The backend selected at construction.
    pub fn mode(&self) -> CacheMode {
        self.mode
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<CacheLookup> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
