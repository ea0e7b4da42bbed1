//! Error types for Taskdeck
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Taskdeck operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the Taskdeck service: transport failures, malformed responses,
/// server-declared API errors, and local configuration or profile storage
/// problems.
#[derive(Error, Debug)]
pub enum TaskdeckError {
    /// Transport-level failure (DNS, connection refused, timeout)
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Response was not JSON or the envelope was malformed
    #[error("INVALID_RESPONSE: {0}")]
    InvalidResponse(String),

    /// Server-declared error extracted from the response envelope
    ///
    /// The `code` is propagated verbatim from the server (validation
    /// failures, not-found, unauthorized, ...). `details` carries any
    /// structured context the server attached.
    #[error("{code}: {message}")]
    Api {
        /// Machine-readable error code from the envelope
        code: String,
        /// Human-readable message from the envelope
        message: String,
        /// Structured details from the envelope, `{}` when absent
        details: serde_json::Value,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile storage errors (credential/identity/theme persistence)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation requires an authenticated session
    #[error("Not logged in; run `taskdeck login` first")]
    NotAuthenticated,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TaskdeckError {
    /// The machine-readable code for this error.
    ///
    /// Server-declared errors report their envelope code verbatim; the
    /// client-side kinds map to the fixed codes `NETWORK_ERROR` and
    /// `INVALID_RESPONSE`. Local errors report a stable synthetic code.
    pub fn code(&self) -> &str {
        match self {
            TaskdeckError::Network(_) => "NETWORK_ERROR",
            TaskdeckError::InvalidResponse(_) => "INVALID_RESPONSE",
            TaskdeckError::Api { code, .. } => code,
            TaskdeckError::Config(_) => "CONFIG_ERROR",
            TaskdeckError::Storage(_) => "STORAGE_ERROR",
            TaskdeckError::NotAuthenticated => "NOT_AUTHENTICATED",
            TaskdeckError::Io(_) => "IO_ERROR",
            TaskdeckError::Serialization(_) => "SERIALIZATION_ERROR",
            TaskdeckError::Yaml(_) => "YAML_ERROR",
        }
    }
}

/// Result type alias for Taskdeck operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
