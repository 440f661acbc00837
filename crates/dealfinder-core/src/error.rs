//! Error types for the dealfinder client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire dealfinder client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. None of these are fatal to
/// the process; callers surface them as non-fatal notifications.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DealfinderError {
    /// A session-gated operation was attempted without an active session.
    /// Resolved locally; no network call is made.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The User API rejected a login attempt.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The User API rejected a registration attempt.
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    /// The remote call could not complete (connect, timeout, transport).
    #[error("Network failure: {0}")]
    Network(String),

    /// The remote service answered with a non-success status.
    #[error("Server error (status {status})")]
    Server { status: u16 },

    /// A favorites mutation was rejected remotely; the local bit was reverted.
    #[error("Failed to update favorites")]
    ToggleFailed,

    /// A history deletion was rejected remotely; local state is unchanged.
    #[error("Failed to update search history")]
    HistoryMutationFailed,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DealfinderError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error
    pub fn server(status: u16) -> Self {
        Self::Server { status }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the transport or the remote service.
    ///
    /// Returns true for:
    /// - `Network` errors
    /// - `Server` errors
    ///
    /// Both collapse to the same generic user-facing message for search.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DealfinderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DealfinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DealfinderError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DealfinderError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for DealfinderError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, DealfinderError>`.
pub type Result<T> = std::result::Result<T, DealfinderError>;
