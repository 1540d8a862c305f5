//! Route table.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, health, session};
use crate::middleware::ip_gate;
use crate::state::AppState;

/// Builds the router. Everything under `/api` passes the IP gate first.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/session", get(session::current_session))
        .route("/session/logout", post(session::logout))
        .route(
            "/admin/sessions/{user_id}",
            get(admin::list_user_sessions).delete(admin::kick_user),
        )
        .layer(from_fn_with_state(state.clone(), ip_gate));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
