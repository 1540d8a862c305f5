//! Administrative session handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use recordhub_core::types::ClientType;

use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientIp};
use crate::middleware::require_admin;
use crate::state::AppState;

/// One registered session in the admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineSessionView {
    pub client_type: ClientType,
    pub session_id: Uuid,
    pub login_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// GET /api/admin/sessions/{user_id}
pub async fn list_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<OnlineSessionView>>, ApiError> {
    require_admin(&auth, &state.config.auth)?;

    let registry = state.session_manager.registry();
    let mut sessions = Vec::new();
    for client_type in ClientType::ALL {
        if let Some(record) = registry.current(user_id, client_type).await? {
            sessions.push(OnlineSessionView {
                client_type,
                session_id: record.session_id,
                login_at: record.login_at,
                ip_address: record.ip_address,
            });
        }
    }
    Ok(Json(sessions))
}

/// DELETE /api/admin/sessions/{user_id}
///
/// Ends the user's sessions on every client type.
pub async fn kick_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientIp(ip): ClientIp,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_admin(&auth, &state.config.auth)?;

    state.session_manager.kick_user(user_id).await?;
    info!(
        admin = auth.claims.user_code(),
        admin_ip = ?ip,
        user_id,
        "Administrative logout"
    );
    Ok(StatusCode::NO_CONTENT)
}
