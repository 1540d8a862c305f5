//! RecordHub Server
//!
//! Main entry point that wires the cache layer, session services, and the
//! HTTP boundary together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use recordhub_api::{AppState, build_router};
use recordhub_cache::CacheManager;
use recordhub_core::config::AppConfig;
use recordhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("RECORDHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RecordHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Initialize cache (fatal on failure) ──────────────
    tracing::info!(
        distributed_mode = config.cache.distributed_mode,
        "Initializing cache..."
    );
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    tracing::info!(mode = ?cache.mode(), "Cache initialized");

    // ── Step 2: Wire services and routes ─────────────────────────
    let bind_address = config.server.bind_address();
    let state = AppState::new(config, cache);
    let router = build_router(state);

    // ── Step 3: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_address}: {e}")))?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
