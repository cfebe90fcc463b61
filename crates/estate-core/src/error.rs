//! Error types for the Estate application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Estate application.
///
/// The two domain failures (`ChatRequestFailed`, `DownloadFailed`) are caught
/// by the conversation layer and never reach the user as raw errors. The
/// remaining variants cover configuration and local I/O.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum EstateError {
    /// Any network or server failure on the chat endpoint
    #[error("Chat request failed: {0}")]
    ChatRequestFailed(String),

    /// Any network or server failure on the download endpoint
    #[error("Download failed: {0}")]
    DownloadFailed(String),

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
}

impl EstateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a ChatRequestFailed error
    pub fn chat_failed(message: impl Into<String>) -> Self {
        Self::ChatRequestFailed(message.into())
    }

    /// Creates a DownloadFailed error
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed(message.into())
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

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from the chat endpoint
    pub fn is_chat_failure(&self) -> bool {
        matches!(self, Self::ChatRequestFailed(_))
    }

    /// Check if this error came from the download endpoint
    pub fn is_download_failure(&self) -> bool {
        matches!(self, Self::DownloadFailed(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EstateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EstateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EstateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EstateError>`.
pub type Result<T> = std::result::Result<T, EstateError>;
