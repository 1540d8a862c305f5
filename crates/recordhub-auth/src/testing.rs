//! Shared fixtures for the unit tests in this crate.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use recordhub_cache::CacheManager;
use recordhub_cache::memory::MemoryCacheProvider;
use recordhub_cache::provider::CacheMode;
use recordhub_core::config::cache::MemoryCacheConfig;
use recordhub_core::error::AppError;
use recordhub_core::result::AppResult;
use recordhub_core::traits::cache::{CacheLookup, CacheProvider};

/// A fresh embedded cache.
pub fn memory_cache() -> Arc<CacheManager> {
    let provider = MemoryCacheProvider::new(&MemoryCacheConfig {
        max_capacity: 10_000,
        time_to_live_seconds: 3600,
    });
    Arc::new(CacheManager::from_provider(
        Arc::new(provider),
        CacheMode::Embedded,
    ))
}

/// A backend whose every call fails, as an unreachable redis would.
#[derive(Debug)]
pub struct BrokenCache;

#[async_trait]
impl CacheProvider for BrokenCache {
    async fn get(&self, _key: &str) -> AppResult<CacheLookup> {
        Err(AppError::cache("connection refused"))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> AppResult<()> {
        Err(AppError::cache("connection refused"))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::cache("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

/// A cache manager routed to [`BrokenCache`].
pub fn broken_cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::from_provider(
        Arc::new(BrokenCache),
        CacheMode::Shared,
    ))
}
