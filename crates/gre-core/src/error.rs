//! Error types for the GRE dashboard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when an authenticated call is attempted without a stored token.
pub const MISSING_TOKEN_MESSAGE: &str = "No authentication token found";
/// Message for a 401 from the data API.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please login again.";
/// Message for any 5xx from the data API.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
/// Message for a request that hit the hard timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your connection.";
/// Message for a request that never reached the server.
pub const NETWORK_MESSAGE: &str = "Network error: Unable to connect to the server.";

/// Coarse classification of a failure, used to drive banners and backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    Timeout,
    Network,
    Server,
    Request,
    MalformedResponse,
    Storage,
    Config,
    Internal,
}

/// A shared error type for the entire dashboard.
///
/// Variants map one-to-one onto the failure classes the views distinguish.
/// The `Display` text of every variant is safe to show to the user verbatim.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GreError {
    /// Missing or malformed user input
    #[error("{0}")]
    Validation(String),

    /// Invalid credentials, missing token or rejected token
    #[error("{0}")]
    Auth(String),

    /// Valid credentials for a user outside the allow-list
    #[error("{0}")]
    AccessDenied(String),

    /// Request exceeded its hard timeout
    #[error("Request timeout. Please check your connection.")]
    Timeout { after_secs: u64 },

    /// Server unreachable
    #[error("{0}")]
    Network(String),

    /// 5xx from the remote API
    #[error("Server error. Please try again later.")]
    Server { status: u16 },

    /// Any other non-2xx response
    #[error("Failed to {action}: {status_text}")]
    RequestFailed {
        action: String,
        status: u16,
        status_text: String,
    },

    /// Upstream rejection whose message is surfaced verbatim
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Response body that does not match any known envelope
    #[error("Unexpected response: {0}")]
    MalformedResponse(String),

    /// Entity not found error with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Local storage read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// The fail-fast error for authenticated endpoints called without a token.
    pub fn missing_token() -> Self {
        Self::Auth(MISSING_TOKEN_MESSAGE.to_string())
    }

    pub fn network() -> Self {
        Self::Network(NETWORK_MESSAGE.to_string())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classifies a non-2xx status from the data API.
    ///
    /// 401 becomes an auth failure, anything >= 500 a server error, and the
    /// rest a generic request failure carrying the status text.
    pub fn from_status(status: u16, status_text: impl Into<String>, action: impl Into<String>) -> Self {
        match status {
            401 => Self::Auth(AUTH_FAILED_MESSAGE.to_string()),
            s if s >= 500 => Self::Server { status: s },
            s => Self::RequestFailed {
                action: action.into(),
                status: s,
                status_text: status_text.into(),
            },
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth(_) | Self::AccessDenied(_) => ErrorKind::Auth,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::RequestFailed { .. } | Self::Upstream { .. } | Self::NotFound { .. } => {
                ErrorKind::Request
            }
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Storage(_) | Self::Serialization { .. } => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True when the server could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status a gateway would answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Auth(_) => 401,
            Self::AccessDenied(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Timeout { .. } => 504,
            Self::Network(_) => 502,
            Self::Server { status }
            | Self::RequestFailed { status, .. }
            | Self::Upstream { status, .. } => *status,
            _ => 500,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for GreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for GreError {
    fn from(err: csv::Error) -> Self {
        Self::Serialization {
            format: "CSV".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for GreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, GreError>`.
pub type Result<T> = std::result::Result<T, GreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let err = GreError::from_status(401, "Unauthorized", "fetch active sessions");
        assert_eq!(err.to_string(), AUTH_FAILED_MESSAGE);
        assert!(err.is_auth());

        let err = GreError::from_status(503, "Service Unavailable", "fetch active sessions");
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);

        let err = GreError::from_status(404, "Not Found", "fetch active sessions");
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.to_string(), "Failed to fetch active sessions: Not Found");
    }

    #[test]
    fn test_timeout_is_distinct_from_network() {
        let timeout = GreError::Timeout { after_secs: 10 };
        let network = GreError::network();
        assert!(timeout.is_timeout());
        assert!(!timeout.is_network());
        assert!(network.is_network());
        assert_eq!(timeout.to_string(), TIMEOUT_MESSAGE);
        assert_eq!(network.to_string(), NETWORK_MESSAGE);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(GreError::validation("x").http_status(), 400);
        assert_eq!(GreError::auth("x").http_status(), 401);
        assert_eq!(GreError::AccessDenied("x".into()).http_status(), 403);
        assert_eq!(
            GreError::Upstream {
                status: 422,
                message: "bad".into()
            }
            .http_status(),
            422
        );
    }
}
