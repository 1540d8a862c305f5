//! Session lifecycle manager: login, per-request authentication, logout.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use recordhub_core::error::AppError;
use recordhub_core::types::{ClientType, UserIdentity};

use crate::jwt::{JwtDecoder, JwtEncoder, SessionClaims};

use super::record::OnlineSessionRecord;
use super::registry::{OnlineSessionRegistry, SessionValidation};

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// Session ID bound to the token and the registry.
    pub session_id: Uuid,
    /// Client type the session is registered under.
    pub client_type: ClientType,
}

/// A request whose token verified and whose session is the registered one.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Verified token claims.
    pub claims: SessionClaims,
    /// Client type the request came from.
    pub client_type: ClientType,
    /// The matching registry record.
    pub record: OnlineSessionRecord,
}

/// Manages the session lifecycle on top of the codec and the registry.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Token signer.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token verifier.
    jwt_decoder: Arc<JwtDecoder>,
    /// Online-session registry.
    registry: Arc<OnlineSessionRegistry>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        registry: Arc<OnlineSessionRegistry>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            registry,
        }
    }

    /// Returns the registry this manager writes to.
    pub fn registry(&self) -> &OnlineSessionRegistry {
        &self.registry
    }

    /// Completes a login whose credentials have already been checked:
    ///
    /// 1. Mint a fresh session ID
    /// 2. Issue a token carrying it
    /// 3. Register it, superseding any earlier login on the same client type
    pub async fn login(
        &self,
        identity: &UserIdentity,
        client_type: ClientType,
        ip_address: Option<IpAddr>,
    ) -> Result<LoginResult, AppError> {
        let session_id = Uuid::now_v7();
        let issued =
            self.jwt_encoder
                .issue_token(identity.user_id, &identity.user_code, session_id)?;

        let mut record = OnlineSessionRecord::new(session_id, &identity.user_code, client_type);
        if let Some(ip) = ip_address {
            record = record.with_ip(ip.to_string());
        }

        self.registry
            .register(identity.user_id, client_type, &record)
            .await?;

        info!(
            user_id = identity.user_id,
            user_code = %identity.user_code,
            %client_type,
            %session_id,
            "User logged in"
        );

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            session_id,
            client_type,
        })
    }

    /// Verifies a token and confirms its session is still the registered one.
    ///
    /// Outcomes, in order of checking:
    /// - token fails verification → `InvalidToken`
    /// - no registry record → `SessionRevoked`
    /// - record for another session → `SessionSuperseded`
    /// - registry unreachable → `ServiceUnavailable`
    pub async fn authenticate(
        &self,
        token: &str,
        client_type: ClientType,
    ) -> Result<AuthenticatedSession, AppError> {
        let claims = self.jwt_decoder.verify_token(token)?;

        let validation = self
            .registry
            .validate(claims.user_id(), client_type, claims.session_id())
            .await
            .map_err(|e| {
                warn!(
                    user_id = claims.user_id(),
                    %client_type,
                    error = %e,
                    "Online-session lookup failed, rejecting request"
                );
                AppError::service_unavailable("Session store unavailable")
            })?;

        match validation {
            SessionValidation::Active(record) => Ok(AuthenticatedSession {
                claims,
                client_type,
                record,
            }),
            SessionValidation::NoSession => Err(AppError::session_revoked()),
            SessionValidation::Superseded { .. } => Err(AppError::session_superseded()),
        }
    }

    /// Logs the user out of one client type.
    pub async fn logout(&self, user_id: i64, client_type: ClientType) -> Result<(), AppError> {
        self.registry.remove(user_id, client_type).await
    }

    /// Forces the user out of every client type.
    pub async fn kick_user(&self, user_id: i64) -> Result<(), AppError> {
        self.registry.remove_all(user_id).await?;
        info!(user_id, "User sessions terminated by administrator");
        Ok(())
    }
}
