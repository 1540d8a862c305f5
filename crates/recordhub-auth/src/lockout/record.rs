//! Values stored under the lockout keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marks a source address as locked from `lock_start`.
///
/// The lock ends at `lock_start + lock duration`. That deadline is computed
/// from the record on every check rather than trusted to cache eviction, so
/// a record can outlive its logical lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpLockRecord {
    /// When the lock began.
    pub lock_start: DateTime<Utc>,
}

/// Failed-login count for one address within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounter {
    /// Failures counted so far.
    pub count: u32,
    /// When the first failure of this window happened.
    pub window_start: DateTime<Utc>,
}
