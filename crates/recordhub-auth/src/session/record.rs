//! The value stored per (user, client type) in the online-session registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recordhub_core::types::ClientType;

/// The currently valid login for one user on one client type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineSessionRecord {
    /// Session ID carried by the token this login issued.
    pub session_id: Uuid,
    /// Business user code.
    pub user_code: String,
    /// Client type the login came from.
    pub client_type: ClientType,
    /// When the login happened.
    pub login_at: DateTime<Utc>,
    /// Source address of the login, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl OnlineSessionRecord {
    /// Creates a record for a login happening now.
    pub fn new(session_id: Uuid, user_code: impl Into<String>, client_type: ClientType) -> Self {
        Self {
            session_id,
            user_code: user_code.into(),
            client_type,
            login_at: Utc::now(),
            ip_address: None,
        }
    }

    /// Attaches the login's source address.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}
