//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use recordhub_core::config::AuthConfig;
use recordhub_core::error::AppError;

use super::ISSUER;
use super::claims::SessionClaims;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Malformed input, a bad signature, a foreign algorithm or issuer, and
    /// an expired token all yield the same [`AppError::invalid_token`]. The
    /// concrete reason only reaches the debug log.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Session token rejected");
                AppError::invalid_token()
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use recordhub_core::error::ErrorKind;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_minutes: 60,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let cfg = config("s3cret");
        let sid = Uuid::new_v4();
        let issued = JwtEncoder::new(&cfg).issue_token(7, "alice", sid).unwrap();

        let claims = JwtDecoder::new(&cfg).verify_token(&issued.token).unwrap();
        assert_eq!(claims.user_id(), 7);
        assert_eq!(claims.user_code(), "alice");
        assert_eq!(claims.session_id(), sid);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.expires_at().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_expiry_is_issue_time_plus_ttl() {
        let cfg = config("s3cret");
        let now = Utc::now();
        let issued = JwtEncoder::new(&cfg)
            .issue_token_at(1, "u", Uuid::new_v4(), now)
            .unwrap();
        assert_eq!(issued.expires_at, now + chrono::Duration::minutes(60));
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("s3cret");
        let issued_at = Utc::now() - chrono::Duration::minutes(61);
        let issued = JwtEncoder::new(&cfg)
            .issue_token_at(1, "u", Uuid::new_v4(), issued_at)
            .unwrap();

        let err = JwtDecoder::new(&cfg).verify_token(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtEncoder::new(&config("one"))
            .issue_token(1, "u", Uuid::new_v4())
            .unwrap();
        let err = JwtDecoder::new(&config("two"))
            .verify_token(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let err = JwtDecoder::new(&config("s3cret"))
            .verify_token("not.a.jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let cfg = config("s3cret");
        let decoder = JwtDecoder::new(&cfg);
        let expired = JwtEncoder::new(&cfg)
            .issue_token_at(1, "u", Uuid::new_v4(), Utc::now() - chrono::Duration::days(1))
            .unwrap();

        let a = decoder.verify_token("garbage").unwrap_err();
        let b = decoder.verify_token(&expired.token).unwrap_err();
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.message, b.message);
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let cfg = config("s3cret");
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            uid: 1,
            ucode: "u".to_string(),
            sid: Uuid::new_v4(),
            iss: "someone-else".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(JwtDecoder::new(&cfg).verify_token(&token).is_err());
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let cfg = config("s3cret");
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            uid: 1,
            ucode: "u".to_string(),
            sid: Uuid::new_v4(),
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(JwtDecoder::new(&cfg).verify_token(&token).is_err());
    }
}
