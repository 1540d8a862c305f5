//! Online-session tracking and the login lifecycle built on it.

pub mod manager;
pub mod record;
pub mod registry;

pub use manager::{AuthenticatedSession, LoginResult, SessionManager};
pub use record::OnlineSessionRecord;
pub use registry::{OnlineSessionRegistry, SessionValidation};
