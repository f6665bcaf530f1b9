//! Error types for the visastat CLI
//!
//! All errors are user-facing: clear messages with a hint about how to
//! recover.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The server rejected the request or reported a failure
    #[error("Server error: {0}. Ensure the visastat server is running (check with 'visastat health') and accessible.")]
    Api(String),

    /// HTTP request failed
    #[error("Request failed: {0}. Check the server URL and your network connection.")]
    Http(#[from] reqwest::Error),

    /// Response could not be decoded
    #[error("Unexpected server response: {0}. The server and CLI versions may be incompatible.")]
    Serialization(#[from] serde_json::Error),
}
