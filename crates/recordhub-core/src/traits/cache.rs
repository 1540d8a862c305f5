//! Cache provider trait for the interchangeable cache backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Outcome of a successful cache read.
///
/// A miss is a first-class result, never an error, and never confused with
/// an entry whose payload happens to be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key exists; the payload is returned as written.
    Found(Bytes),
    /// The key was never written, was deleted, or has expired.
    NotFound,
}

impl CacheLookup {
    /// Returns `true` if the key was present.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Trait for cache backends (embedded or shared).
///
/// Values are opaque byte blobs. Together with the `Err` arm of
/// [`AppResult`], [`CacheLookup`] gives `get` its three outcomes:
/// found, not found, or backend failure.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key.
    async fn get(&self, key: &str) -> AppResult<CacheLookup>;

    /// Set a value with a TTL, overwriting any previous value.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            CacheLookup::Found(bytes) => {
                let parsed = serde_json::from_slice(&bytes)?;
                Ok(Some(parsed))
            }
            CacheLookup::NotFound => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_vec(value)?;
        self.set(key, Bytes::from(json), ttl).await
    }
}
