//! Authenticated user identity handed over by the credential check.

use serde::{Deserialize, Serialize};

/// The identity a successful credential check produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Numeric user ID.
    pub user_id: i64,
    /// Business user code (login name).
    pub user_code: String,
}

impl UserIdentity {
    /// Creates a new identity.
    pub fn new(user_id: i64, user_code: impl Into<String>) -> Self {
        Self {
            user_id,
            user_code: user_code.into(),
        }
    }
}
