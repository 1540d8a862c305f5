//! # recordhub-auth
//!
//! Session and abuse-prevention layer for RecordHub, built on the cache
//! facade from `recordhub-cache`.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-limited session token issue and verification
//! - `session`: online-session registry (one live session per user and
//!   client type) and the login/authenticate/logout flows on top of it
//! - `lockout`: IP lockout guard and failed-login accounting

pub mod jwt;
pub mod lockout;
pub mod session;

pub use jwt::{JwtDecoder, JwtEncoder, SessionClaims};
pub use lockout::{IpLockoutGuard, LockStatus, LoginAttemptTracker};
pub use session::{OnlineSessionRegistry, SessionManager, SessionValidation};

#[cfg(test)]
pub(crate) mod testing;
