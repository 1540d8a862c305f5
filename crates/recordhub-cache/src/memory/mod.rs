//! Embedded in-process cache backend.

pub mod store;

pub use store::MemoryCacheProvider;
