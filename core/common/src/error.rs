//! Common error types for SmsVault.

use thiserror::Error;

/// Top-level error type for SmsVault operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input provided (missing or malformed request parameter).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No client implementation exists for the requested provider name.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Provider authentication failed (missing, unwritable, or malformed credentials).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// No matching backup exists at the provider.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or provider API fault.
    #[error("Network error: {0}")]
    Network(String),

    /// Backup content is not well-formed XML.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Resource already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
