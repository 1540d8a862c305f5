//! Liveness and cache reachability.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use recordhub_core::traits::CacheProvider;

use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let cache_ok = state.cache.health_check().await.unwrap_or(false);
    let status = if cache_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(json!({
            "status": if cache_ok { "ok" } else { "degraded" },
            "cache": cache_ok,
        })),
    )
}
