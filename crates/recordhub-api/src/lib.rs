//! # recordhub-api
//!
//! The request boundary in front of the session layer: the IP gate
//! middleware, the `AuthUser` extractor, and the mapping from `AppError`
//! to HTTP responses.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
