//! Core type definitions shared by the session and lockout layers.

pub mod client;
pub mod identity;

pub use client::ClientType;
pub use identity::UserIdentity;
