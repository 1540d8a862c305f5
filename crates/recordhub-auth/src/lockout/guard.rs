//! Request-time IP lockout gate.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use recordhub_cache::CacheManager;
use recordhub_cache::keys;
use recordhub_core::config::LockoutConfig;
use recordhub_core::result::AppResult;
use recordhub_core::traits::CacheProvider;

use super::minutes_until;
use super::record::IpLockRecord;

/// Whether an address may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// No live lock.
    Open,
    /// Locked until `until`.
    Locked {
        /// Minutes left, rounded up.
        remaining_minutes: i64,
        /// When the lock ends.
        until: DateTime<Utc>,
    },
}

impl LockStatus {
    /// Returns `true` when the address is locked.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

/// Reads lock records and expires them once their window has passed.
///
/// Records are written by [`super::LoginAttemptTracker`]; the guard only
/// consumes them.
#[derive(Debug, Clone)]
pub struct IpLockoutGuard {
    /// Cache facade holding the lock records.
    cache: Arc<CacheManager>,
    /// Configured lock duration.
    lock_duration: Duration,
}

impl IpLockoutGuard {
    /// Creates a guard over the given cache.
    pub fn new(cache: Arc<CacheManager>, config: &LockoutConfig) -> Self {
        Self {
            cache,
            lock_duration: Duration::minutes(config.lock_minutes as i64),
        }
    }

    /// Checks `ip` against the current time.
    pub async fn check(&self, ip: IpAddr) -> AppResult<LockStatus> {
        self.check_at(ip, Utc::now()).await
    }

    /// Checks `ip` as of `now`.
    ///
    /// The address is blocked while `now < lock_start + lock duration`. Once
    /// that deadline is reached the record is deleted and the address is
    /// open again. Backend errors propagate; the caller must reject the
    /// request rather than let it through.
    pub async fn check_at(&self, ip: IpAddr, now: DateTime<Utc>) -> AppResult<LockStatus> {
        let key = keys::ip_lock(ip);
        let record: Option<IpLockRecord> = self
            .cache
            .get_json(&key)
            .await
            .inspect_err(|e| warn!(%key, error = %e, "Failed to read IP lock record"))?;

        let Some(record) = record else {
            return Ok(LockStatus::Open);
        };

        let deadline = record.lock_start + self.lock_duration;
        if now < deadline {
            let remaining_minutes = minutes_until(deadline, now);
            debug!(%ip, remaining_minutes, "Request from locked address");
            return Ok(LockStatus::Locked {
                remaining_minutes,
                until: deadline,
            });
        }

        // Logically expired; don't wait for eviction.
        if let Err(e) = self.cache.delete(&key).await {
            warn!(%key, error = %e, "Failed to delete expired IP lock record");
        } else {
            info!(%ip, "IP lock expired and cleared");
        }
        Ok(LockStatus::Open)
    }
}
