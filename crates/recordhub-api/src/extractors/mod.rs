//! Custom Axum extractors.

pub mod auth;
pub mod client;

pub use auth::AuthUser;
pub use client::{ClientIp, client_type_from_headers, resolve_client_ip};
