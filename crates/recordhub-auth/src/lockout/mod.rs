//! IP lockout: the request-time guard and the failed-login accounting
//! that feeds it.

pub mod guard;
pub mod record;
pub mod tracker;

pub use guard::{IpLockoutGuard, LockStatus};
pub use record::{FailureCounter, IpLockRecord};
pub use tracker::{FailureOutcome, LoginAttemptTracker};

use chrono::{DateTime, Utc};

/// Whole minutes from `now` until `deadline`, rounded up.
///
/// Only meaningful while `now < deadline`; callers check that first.
pub(crate) fn minutes_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    (millis + 59_999) / 60_000
}
