//! Failed-login accounting and IP lockout configuration.

use serde::{Deserialize, Serialize};

/// IP lockout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockoutConfig {
    /// Failed logins from one address before it is locked.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: u32,
    /// Window in minutes over which failures are counted.
    #[serde(default = "default_failure_window")]
    pub failure_window_minutes: u64,
    /// Lock duration in minutes.
    #[serde(default = "default_lock_minutes")]
    pub lock_minutes: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: default_max_failed(),
            failure_window_minutes: default_failure_window(),
            lock_minutes: default_lock_minutes(),
        }
    }
}

fn default_max_failed() -> u32 {
    5
}

fn default_failure_window() -> u64 {
    15
}

fn default_lock_minutes() -> u64 {
    30
}
