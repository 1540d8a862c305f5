//! Core traits defined in `recordhub-core` and implemented by other crates.

pub mod cache;

pub use cache::{CacheLookup, CacheProvider};
