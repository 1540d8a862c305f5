//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use recordhub_api::{AppState, build_router};
use recordhub_auth::session::LoginResult;
use recordhub_cache::CacheManager;
use recordhub_core::config::AppConfig;
use recordhub_core::types::{ClientType, UserIdentity};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over a fresh embedded cache
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`], with `customize` applied to the config first
    pub async fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.admin_user_codes = vec!["admin".to_string()];
        config.lockout.max_failed_attempts = 3;
        config.lockout.lock_minutes = 10;
        customize(&mut config);
        config.validate().expect("Invalid test config");

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let state = AppState::new(config, cache);
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Log a user in through the session manager and return the token
    pub async fn login(&self, user_id: i64, user_code: &str, client: ClientType) -> LoginResult {
        self.state
            .session_manager
            .login(&UserIdentity::new(user_id, user_code), client, None)
            .await
            .expect("Login failed")
    }

    /// Make a request with optional bearer token, client type, and socket peer
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        client: Option<&str>,
        ip: Option<&str>,
    ) -> TestResponse {
        self.request_via(method, uri, token, client, ip, None).await
    }

    /// Make a request from socket peer `ip`, optionally carrying an
    /// `X-Forwarded-For` header
    pub async fn request_via(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        client: Option<&str>,
        ip: Option<&str>,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        if let Some(client) = client {
            builder = builder.header("x-client-type", client);
        }
        if let Some(forwarded_for) = forwarded_for {
            builder = builder.header("x-forwarded-for", forwarded_for);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        if let Some(ip) = ip {
            let peer: SocketAddr = format!("{ip}:40000").parse().unwrap();
            request.extensions_mut().insert(ConnectInfo(peer));
        }

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
