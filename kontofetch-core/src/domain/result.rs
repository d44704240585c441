//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Everything is fail-fast: no variant is retried anywhere, and protocol
/// errors surface to the caller unmodified.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A field value the flattener has no conversion rule for.
    /// Signals a missing case that must be added, never silently stringified.
    #[error("Unsupported value of kind '{kind}' at field '{field}'")]
    UnsupportedType { field: String, kind: &'static str },

    /// Two distinct paths produced the same flat key.
    #[error("Flat key collision on '{0}'")]
    KeyCollision(String),

    #[error("TAN error: {0}")]
    Tan(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
