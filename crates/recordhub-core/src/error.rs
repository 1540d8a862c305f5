//! Unified application error types for RecordHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No credential was presented, or the header was malformed.
    Unauthenticated,
    /// The session token failed signature, algorithm, issuer, or expiry checks.
    ///
    /// Every codec failure collapses into this one kind.
    InvalidToken,
    /// No online-session record exists for the token's user and client type.
    SessionRevoked,
    /// A newer login for the same user and client type replaced this session.
    SessionSuperseded,
    /// Authenticated, but not allowed to perform the operation.
    Forbidden,
    /// The source address is inside a lockout window.
    IpLocked,
    /// Input validation failed.
    Validation,
    /// A cache backend error occurred (transport, timeout, pool).
    Cache,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::SessionRevoked => write!(f, "SESSION_REVOKED"),
            Self::SessionSuperseded => write!(f, "SESSION_SUPERSEDED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::IpLocked => write!(f, "IP_LOCKED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Cache => write!(f, "CACHE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout RecordHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional structured details surfaced to the client.
    pub details: Option<serde_json::Value>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach structured details to this error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create a "login required" error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create the single invalid-credential error.
    ///
    /// The message is fixed so callers cannot tell a forged token from an
    /// expired one.
    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, "Invalid or expired token")
    }

    /// Create a revoked-session error.
    pub fn session_revoked() -> Self {
        Self::new(
            ErrorKind::SessionRevoked,
            "Session is no longer active, please log in again",
        )
    }

    /// Create a superseded-session error.
    pub fn session_superseded() -> Self {
        Self::new(
            ErrorKind::SessionSuperseded,
            "Your account has been logged in elsewhere",
        )
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create an IP lockout error carrying the remaining lock minutes.
    pub fn ip_locked(remaining_minutes: i64) -> Self {
        Self::new(
            ErrorKind::IpLocked,
            format!("Too many failed attempts, retry after {remaining_minutes} minutes"),
        )
        .with_details(serde_json::json!({ "retry_after_minutes": remaining_minutes }))
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Returns `true` for the outcomes that mean "the caller is not logged in".
    pub fn is_credential_rejection(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Unauthenticated
                | ErrorKind::InvalidToken
                | ErrorKind::SessionRevoked
                | ErrorKind::SessionSuperseded
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            details: self.details.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_locked_carries_minutes() {
        let err = AppError::ip_locked(7);
        assert_eq!(err.kind, ErrorKind::IpLocked);
        assert_eq!(
            err.details,
            Some(serde_json::json!({ "retry_after_minutes": 7 }))
        );
        assert!(err.message.contains("7 minutes"));
    }

    #[test]
    fn test_credential_rejections() {
        assert!(AppError::invalid_token().is_credential_rejection());
        assert!(AppError::session_revoked().is_credential_rejection());
        assert!(AppError::session_superseded().is_credential_rejection());
        assert!(!AppError::cache("boom").is_credential_rejection());
        assert!(!AppError::ip_locked(1).is_credential_rejection());
    }

    #[test]
    fn test_clone_drops_source_keeps_details() {
        let err = AppError::with_source(
            ErrorKind::Cache,
            "redis down",
            std::io::Error::other("refused"),
        )
        .with_details(serde_json::json!({"key": "k"}));
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.details, err.details);
        assert_eq!(cloned.to_string(), "CACHE: redis down");
    }
}
