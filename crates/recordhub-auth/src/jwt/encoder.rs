//! Session token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recordhub_core::config::AuthConfig;
use recordhub_core::error::AppError;

use super::ISSUER;
use super::claims::SessionClaims;

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// A freshly signed token and the moment it stops being valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes as i64,
        }
    }

    /// Issues a token for the given user and login session, valid from now.
    pub fn issue_token(
        &self,
        user_id: i64,
        user_code: &str,
        session_id: Uuid,
    ) -> Result<IssuedToken, AppError> {
        self.issue_token_at(user_id, user_code, session_id, Utc::now())
    }

    /// Issues a token as if it were signed at `issued_at`.
    pub fn issue_token_at(
        &self,
        user_id: i64,
        user_code: &str,
        session_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = issued_at + chrono::Duration::minutes(self.ttl_minutes);

        let claims = SessionClaims {
            uid: user_id,
            ucode: user_code.to_string(),
            sid: session_id,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
