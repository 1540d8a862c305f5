//! IP lockout gate, run before any authentication work.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use recordhub_auth::lockout::LockStatus;
use recordhub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::client::resolve_client_ip;
use crate::state::AppState;

/// Rejects requests from locked addresses with 429 and the minutes left.
///
/// Fails closed: if the lock record cannot be read the request is refused.
pub async fn ip_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(ip) = resolve_client_ip(
        request.headers(),
        request.extensions(),
        &state.config.server.trusted_proxies,
    ) else {
        return next.run(request).await;
    };

    match state.lockout_guard.check(ip).await {
        Ok(LockStatus::Open) => next.run(request).await,
        Ok(LockStatus::Locked {
            remaining_minutes, ..
        }) => ApiError(AppError::ip_locked(remaining_minutes)).into_response(),
        Err(e) => {
            warn!(%ip, error = %e, "Lockout check failed, refusing request");
            ApiError(AppError::service_unavailable("Lockout check unavailable")).into_response()
        }
    }
}
