//! Cache key builders for the session and lockout entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. The shared backend adds its
//! configured prefix on top of these.

use std::net::IpAddr;

use recordhub_core::types::ClientType;

// ── Session keys ───────────────────────────────────────────

/// Cache key for the online-session record of a user on one client type.
pub fn online_session(user_id: i64, client_type: ClientType) -> String {
    format!("session:online:{user_id}:{client_type}")
}

// ── Lockout keys ───────────────────────────────────────────

/// Cache key for the lock record of a source address.
pub fn ip_lock(ip: IpAddr) -> String {
    format!("lock:ip:{ip}")
}

/// Cache key for the failed-login counter of a source address.
pub fn login_failures(ip: IpAddr) -> String {
    format!("lock:failures:{ip}")
}
