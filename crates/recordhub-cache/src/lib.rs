//! # recordhub-cache
//!
//! Cache backends for RecordHub. Supports two interchangeable modes:
//!
//! - **embedded**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **shared**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The backend is selected once at startup from `cache.distributed_mode`
//! and reached through [`CacheManager`].

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
