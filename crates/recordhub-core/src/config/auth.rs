//! Session token configuration.

use serde::{Deserialize, Serialize};

/// Session token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token validity in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// User codes allowed to use the administrative session routes.
    #[serde(default)]
    pub admin_user_codes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            admin_user_codes: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Whether `user_code` may use the administrative routes.
    pub fn is_admin(&self, user_code: &str) -> bool {
        self.admin_user_codes.iter().any(|c| c == user_code)
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    720
}
