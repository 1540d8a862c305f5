//! # recordhub-core
//!
//! Core crate for RecordHub. Contains the cache provider contract,
//! configuration schemas, shared session types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other RecordHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
