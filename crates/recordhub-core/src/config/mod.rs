//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Configuration is read once at startup and never reloaded.

pub mod app;
pub mod auth;
pub mod cache;
pub mod lockout;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::lockout::LockoutConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Cache backend settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Session token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Online-session registry settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Failed-login accounting and IP lockout settings.
    #[serde(default)]
    pub lockout: LockoutConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `RECORDHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RECORDHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave the cache layer non-functional.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be greater than zero",
            ));
        }
        if self.session.ttl_minutes == 0 {
            return Err(AppError::configuration(
                "session.ttl_minutes must be greater than zero",
            ));
        }
        if self.cache.distributed_mode {
            self.validate_shared_cache()?;
        } else {
            self.validate_embedded_cache()?;
        }
        if self.lockout.max_failed_attempts == 0 {
            return Err(AppError::configuration(
                "lockout.max_failed_attempts must be greater than zero",
            ));
        }
        if self.lockout.lock_minutes == 0 {
            return Err(AppError::configuration(
                "lockout.lock_minutes must be greater than zero",
            ));
        }
        Ok(())
    }

    fn validate_shared_cache(&self) -> Result<(), AppError> {
        if self.cache.redis.pool_size == 0 {
            return Err(AppError::configuration(
                "cache.redis.pool_size must be greater than zero",
            ));
        }
        if self.cache.redis.command_timeout_ms == 0 {
            return Err(AppError::configuration(
                "cache.redis.command_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The embedded cache evicts every entry after one global TTL, so that
    /// TTL must outlive the longest lock and session it holds.
    fn validate_embedded_cache(&self) -> Result<(), AppError> {
        let ttl_seconds = self.cache.memory.time_to_live_seconds;
        if ttl_seconds == 0 {
            return Err(AppError::configuration(
                "cache.memory.time_to_live_seconds must be greater than zero",
            ));
        }
        let lock_seconds = self.lockout.lock_minutes.saturating_mul(60);
        if ttl_seconds < lock_seconds {
            return Err(AppError::configuration(format!(
                "cache.memory.time_to_live_seconds ({ttl_seconds}) is shorter than \
                 lockout.lock_minutes ({lock_seconds}s)"
            )));
        }
        let session_seconds = self.session.ttl_minutes.saturating_mul(60);
        if ttl_seconds < session_seconds {
            return Err(AppError::configuration(format!(
                "cache.memory.time_to_live_seconds ({ttl_seconds}) is shorter than \
                 session.ttl_minutes ({session_seconds}s)"
            )));
        }
        Ok(())
    }
}
