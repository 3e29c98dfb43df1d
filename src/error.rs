//! Error types for arqual

use std::io;
use thiserror::Error;

/// Result type alias for arqual operations
pub type Result<T> = std::result::Result<T, ArqualError>;

/// Main error type for arqual
#[derive(Error, Debug)]
pub enum ArqualError {
    /// Bad command-line input. Rendering and exit status are left to clap.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("No data found.")]
    NoData,

    /// Failure writing the report to stdout
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ArqualError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArqualError::Usage(e) => e.exit_code(),
            ArqualError::Network(_) => 3,
            ArqualError::Parse(_) => 4,
            ArqualError::NoData | ArqualError::Io(_) => 1,
        }
    }
}

/// Failures talking to the remote server
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to '{url}' returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from '{url}': {message}")]
    Body { url: String, message: String },

    #[error("server answered with error {code}: {message}")]
    Remote { code: i64, message: String },
}

/// Unexpected shape of a response document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no '{0}' field, the site layout may have changed")]
    MissingField(&'static str),
}
