//! Error types for the chat engine.

use thiserror::Error;

/// Chat engine error type.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A rule pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    /// Request body could not be parsed.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
    /// Request body could not be read.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
