//! Cache backend configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Selects the shared (redis) backend when `true`, the embedded one otherwise.
    ///
    /// Decided once at startup; there is no switching afterwards.
    #[serde(default)]
    pub distributed_mode: bool,
    /// Shared backend configuration.
    #[serde(default)]
    pub redis: RedisCacheConfig,
    /// Embedded backend configuration.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

/// Redis cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    /// Redis connection URL, credentials included.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Number of pooled connections opened at startup.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Key prefix for all RecordHub cache keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Deadline for a single command round trip in milliseconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_ms: u64,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            pool_size: default_pool_size(),
            key_prefix: default_key_prefix(),
            command_timeout_ms: default_command_timeout(),
        }
    }
}

impl RedisCacheConfig {
    /// Command deadline as a [`Duration`].
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// In-memory cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries in the cache.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// TTL for every in-memory entry in seconds.
    #[serde(default = "default_memory_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_memory_ttl(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_key_prefix() -> String {
    "recordhub:".to_string()
}

fn default_command_timeout() -> u64 {
    2000
}

fn default_max_capacity() -> u64 {
    100_000
}

fn default_memory_ttl() -> u64 {
    43_200
}
