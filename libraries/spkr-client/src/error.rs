//! Error types for the spkrd client.

use thiserror::Error;

/// Every way a play request can fail.
///
/// The `Display` text is what the command-line client prints, so each
/// variant starts with its failure marker.
#[derive(Error, Debug)]
pub enum PlayError {
    /// The request could not be built (bad URL, body encoding)
    #[error("Request error: {0}")]
    Request(String),

    /// DNS failure, refused connection, timeout
    #[error("Connection error: {0}")]
    Connection(String),

    /// Server rejected the melody (HTTP 400)
    #[error("Invalid melody: {0}")]
    InvalidMelody(String),

    /// Speaker device is in use (HTTP 503)
    #[error("Device busy: {0}")]
    DeviceBusy(String),

    /// Server failed while driving the device (HTTP 500)
    #[error("Server error: {0}")]
    Server(String),

    /// Any status code without a defined meaning
    #[error("Unexpected response: HTTP {0}")]
    UnexpectedStatus(u16),
}

impl From<reqwest::Error> for PlayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, PlayError>;
