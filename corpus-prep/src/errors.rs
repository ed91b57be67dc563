//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for corpus extraction operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors on the output side.
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A tree violating the input contract, e.g. a path endpoint without a token.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// Malformed dump line or path string.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// API misuse, e.g. storing into a sink that was never opened.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
