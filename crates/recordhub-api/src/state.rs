//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use recordhub_auth::jwt::{JwtDecoder, JwtEncoder};
use recordhub_auth::lockout::{IpLockoutGuard, LoginAttemptTracker};
use recordhub_auth::session::{OnlineSessionRegistry, SessionManager};
use recordhub_cache::CacheManager;
use recordhub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Cache facade (redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Login, authentication, and logout flows
    pub session_manager: Arc<SessionManager>,
    /// Request-time IP lockout gate
    pub lockout_guard: Arc<IpLockoutGuard>,
    /// Failed-login accounting, for the credential-checking login flow
    pub attempt_tracker: Arc<LoginAttemptTracker>,
}

impl AppState {
    /// Wires every service over one cache facade.
    pub fn new(config: AppConfig, cache: Arc<CacheManager>) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let registry = Arc::new(OnlineSessionRegistry::new(
            Arc::clone(&cache),
            &config.session,
        ));
        let session_manager = Arc::new(SessionManager::new(jwt_encoder, jwt_decoder, registry));
        let lockout_guard = Arc::new(IpLockoutGuard::new(Arc::clone(&cache), &config.lockout));
        let attempt_tracker = Arc::new(LoginAttemptTracker::new(
            Arc::clone(&cache),
            &config.lockout,
        ));

        Self {
            config: Arc::new(config),
            cache,
            session_manager,
            lockout_guard,
            attempt_tracker,
        }
    }
}
