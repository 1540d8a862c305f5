//! Request middleware.

pub mod ip_gate;
pub mod rbac;

pub use ip_gate::ip_gate;
pub use rbac::require_admin;
