//! Online-session registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Online-session registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a registry entry in minutes.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
        }
    }
}

impl SessionConfig {
    /// Registry entry lifetime as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

fn default_ttl() -> u64 {
    720
}
