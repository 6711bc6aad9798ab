//! Session-related types.
//!
//! Types stored in the session for authentication state and one-shot notices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session-stored identity of the logged-in user.
///
/// Holds nothing but the username; everything else is looked up on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The username, which is the sole identity key for users.
    pub id: String,
}

impl Principal {
    /// Create a principal for the given username.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Severity of a flash notice, used as a CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in principal.
    pub const PRINCIPAL: &str = "principal";

    /// Key for the queue of pending flash notices.
    pub const FLASHES: &str = "flashes";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_level_serializes_lowercase() {
        let json = serde_json::to_string(&Flash::error("nope")).unwrap();
        assert_eq!(json, r#"{"level":"error","message":"nope"}"#);
    }

    #[test]
    fn test_principal_round_trips_through_session_json() {
        let principal = Principal::new("admin");
        let value = serde_json::to_value(&principal).unwrap();
        let back: Principal = serde_json::from_value(value).unwrap();
        assert_eq!(back, principal);
    }
}
