//! Guards for the administrative routes.

use recordhub_core::config::AuthConfig;
use recordhub_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user is a configured administrator.
pub fn require_admin(auth: &AuthUser, config: &AuthConfig) -> Result<(), AppError> {
    if !config.is_admin(auth.claims.user_code()) {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}
