//! Current-session handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recordhub_core::types::ClientType;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Body of GET /api/session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Numeric user ID.
    pub user_id: i64,
    /// Business user code.
    pub user_code: String,
    /// Session ID of the presented token.
    pub session_id: Uuid,
    /// Client type the session is registered under.
    pub client_type: ClientType,
    /// When the login happened.
    pub login_at: DateTime<Utc>,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// GET /api/session
pub async fn current_session(auth: AuthUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        user_id: auth.claims.user_id(),
        user_code: auth.claims.user_code().to_string(),
        session_id: auth.claims.session_id(),
        client_type: auth.client_type,
        login_at: auth.record.login_at,
        expires_at: auth.claims.expires_at(),
    })
}

/// POST /api/session/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<StatusCode, ApiError> {
    state
        .session_manager
        .logout(auth.user_id(), auth.client_type)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
