//! Calling-application categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Category of calling application.
///
/// The single-active-session rule is enforced per client type, so a user
/// may be logged in once on the web and once on mobile at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    /// Browser client.
    #[default]
    Web,
    /// Mobile application.
    Mobile,
    /// Desktop application.
    Desktop,
}

impl ClientType {
    /// Every client type, used for administrative removal across all of them.
    pub const ALL: [ClientType; 3] = [ClientType::Web, ClientType::Mobile, ClientType::Desktop];

    /// Stable lowercase name used in cache keys and headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(AppError::validation(format!("Unknown client type: '{other}'"))),
        }
    }
}
