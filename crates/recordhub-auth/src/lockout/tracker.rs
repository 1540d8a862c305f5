//! Failed-login accounting per source address.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use recordhub_cache::CacheManager;
use recordhub_cache::keys;
use recordhub_core::config::LockoutConfig;
use recordhub_core::result::AppResult;
use recordhub_core::traits::CacheProvider;

use super::minutes_until;
use super::record::{FailureCounter, IpLockRecord};

/// What a recorded failure led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Counted; the address is not locked yet.
    Counted {
        /// Failures in the current window.
        attempts: u32,
        /// Failures left before the lock.
        remaining_attempts: u32,
    },
    /// The threshold was reached and a lock record was written.
    Locked {
        /// Lock length in minutes.
        remaining_minutes: i64,
    },
}

/// Counts failed logins per address and writes the lock record once the
/// configured threshold is reached.
///
/// The count is a read-modify-write on the cache, so concurrent failures
/// from one address can undercount.
#[derive(Debug, Clone)]
pub struct LoginAttemptTracker {
    /// Cache facade holding counters and lock records.
    cache: Arc<CacheManager>,
    /// Failures that trigger a lock.
    max_failed_attempts: u32,
    /// Counting window.
    failure_window: Duration,
    /// Lock duration.
    lock_duration: Duration,
}

impl LoginAttemptTracker {
    /// Creates a tracker from lockout configuration.
    pub fn new(cache: Arc<CacheManager>, config: &LockoutConfig) -> Self {
        Self {
            cache,
            max_failed_attempts: config.max_failed_attempts,
            failure_window: Duration::minutes(config.failure_window_minutes as i64),
            lock_duration: Duration::minutes(config.lock_minutes as i64),
        }
    }

    /// Records a failed login from `ip` now.
    pub async fn record_failure(&self, ip: IpAddr) -> AppResult<FailureOutcome> {
        self.record_failure_at(ip, Utc::now()).await
    }

    /// Records a failed login from `ip` as of `now`.
    pub async fn record_failure_at(
        &self,
        ip: IpAddr,
        now: DateTime<Utc>,
    ) -> AppResult<FailureOutcome> {
        let counter_key = keys::login_failures(ip);
        let previous: Option<FailureCounter> = self
            .cache
            .get_json(&counter_key)
            .await
            .inspect_err(|e| warn!(key = %counter_key, error = %e, "Failed to read failure counter"))?;

        let counter = match previous {
            Some(c) if now < c.window_start + self.failure_window => FailureCounter {
                count: c.count + 1,
                window_start: c.window_start,
            },
            _ => FailureCounter {
                count: 1,
                window_start: now,
            },
        };

        if counter.count >= self.max_failed_attempts {
            let lock_key = keys::ip_lock(ip);
            self.cache
                .set_json(
                    &lock_key,
                    &IpLockRecord { lock_start: now },
                    to_std(self.lock_duration),
                )
                .await
                .inspect_err(|e| warn!(key = %lock_key, error = %e, "Failed to write IP lock record"))?;

            if let Err(e) = self.cache.delete(&counter_key).await {
                warn!(key = %counter_key, error = %e, "Failed to clear failure counter");
            }

            info!(%ip, attempts = counter.count, "Address locked after repeated login failures");
            return Ok(FailureOutcome::Locked {
                remaining_minutes: minutes_until(now + self.lock_duration, now),
            });
        }

        let ttl = counter.window_start + self.failure_window - now;
        self.cache
            .set_json(&counter_key, &counter, to_std(ttl))
            .await
            .inspect_err(|e| warn!(key = %counter_key, error = %e, "Failed to write failure counter"))?;

        Ok(FailureOutcome::Counted {
            attempts: counter.count,
            remaining_attempts: self.max_failed_attempts - counter.count,
        })
    }

    /// Clears the failure count for `ip` after a successful login.
    pub async fn record_success(&self, ip: IpAddr) -> AppResult<()> {
        let key = keys::login_failures(ip);
        self.cache
            .delete(&key)
            .await
            .inspect_err(|e| warn!(%key, error = %e, "Failed to clear failure counter"))
    }
}

fn to_std(duration: Duration) -> StdDuration {
    duration.to_std().unwrap_or(StdDuration::from_secs(1))
}
