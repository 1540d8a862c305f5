//! `AuthUser` extractor. Pulls the token from the Authorization header,
//! verifies it, and confirms the session is still the registered one.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use recordhub_auth::session::AuthenticatedSession;
use recordhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

use super::client::client_type_from_headers;

/// Extracted authenticated session available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedSession);

impl AuthUser {
    /// Returns the user ID.
    pub fn user_id(&self) -> i64 {
        self.0.claims.user_id()
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedSession;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Login required"))?;

        let client_type = client_type_from_headers(&parts.headers)?;

        let session = state
            .session_manager
            .authenticate(token, client_type)
            .await?;

        Ok(AuthUser(session))
    }
}
