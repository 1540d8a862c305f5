//! Online-session registry: one live session per user and client type.
//!
//! Each login overwrites the record for its (user, client type) pair, so
//! the previous token's session ID stops matching without anything being
//! deleted first. Concurrent logins for the same pair race on the backend
//! and the last committed write wins.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use recordhub_cache::CacheManager;
use recordhub_cache::keys;
use recordhub_core::config::SessionConfig;
use recordhub_core::result::AppResult;
use recordhub_core::traits::CacheProvider;
use recordhub_core::types::ClientType;

use super::record::OnlineSessionRecord;

/// Result of checking a token's session ID against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidation {
    /// No record: never logged in, logged out, kicked, or expired.
    NoSession,
    /// A record exists but belongs to a newer login.
    Superseded {
        /// The session ID that is valid now.
        current_session_id: Uuid,
    },
    /// The token's session is the registered one.
    Active(OnlineSessionRecord),
}

impl SessionValidation {
    /// Whether a record exists for the pair at all.
    pub fn exists(&self) -> bool {
        !matches!(self, Self::NoSession)
    }

    /// Whether the checked session ID is the registered one.
    pub fn matches(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Maps (user, client type) to the currently valid session.
#[derive(Debug, Clone)]
pub struct OnlineSessionRegistry {
    /// Cache facade holding the records.
    cache: Arc<CacheManager>,
    /// Record lifetime.
    ttl: Duration,
}

impl OnlineSessionRegistry {
    /// Creates a registry over the given cache.
    pub fn new(cache: Arc<CacheManager>, config: &SessionConfig) -> Self {
        Self {
            cache,
            ttl: config.ttl(),
        }
    }

    /// Records `record` as the live session for the pair, replacing any other.
    pub async fn register(
        &self,
        user_id: i64,
        client_type: ClientType,
        record: &OnlineSessionRecord,
    ) -> AppResult<()> {
        let key = keys::online_session(user_id, client_type);
        self.cache
            .set_json(&key, record, self.ttl)
            .await
            .inspect_err(|e| warn!(%key, error = %e, "Failed to register online session"))?;

        debug!(user_id, %client_type, session_id = %record.session_id, "Online session registered");
        Ok(())
    }

    /// Compares `session_id` with the registered session for the pair.
    pub async fn validate(
        &self,
        user_id: i64,
        client_type: ClientType,
        session_id: Uuid,
    ) -> AppResult<SessionValidation> {
        Ok(match self.current(user_id, client_type).await? {
            None => SessionValidation::NoSession,
            Some(record) if record.session_id == session_id => SessionValidation::Active(record),
            Some(record) => SessionValidation::Superseded {
                current_session_id: record.session_id,
            },
        })
    }

    /// Returns the registered record for the pair, if any.
    pub async fn current(
        &self,
        user_id: i64,
        client_type: ClientType,
    ) -> AppResult<Option<OnlineSessionRecord>> {
        let key = keys::online_session(user_id, client_type);
        self.cache
            .get_json(&key)
            .await
            .inspect_err(|e| warn!(%key, error = %e, "Failed to read online session"))
    }

    /// Removes the record for the pair (logout or administrative kick).
    pub async fn remove(&self, user_id: i64, client_type: ClientType) -> AppResult<()> {
        let key = keys::online_session(user_id, client_type);
        self.cache
            .delete(&key)
            .await
            .inspect_err(|e| warn!(%key, error = %e, "Failed to remove online session"))?;

        info!(user_id, %client_type, "Online session removed");
        Ok(())
    }

    /// Removes the user's records for every client type.
    pub async fn remove_all(&self, user_id: i64) -> AppResult<()> {
        for client_type in ClientType::ALL {
            self.remove(user_id, client_type).await?;
        }
        Ok(())
    }
}
