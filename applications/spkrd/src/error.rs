/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;
use thiserror::Error;

/// `EBUSY` on both FreeBSD and Linux.
const EBUSY: i32 = 16;

#[derive(Debug, Error)]
pub enum SpeakerError {
    #[error("Speaker device is busy")]
    DeviceBusy,

    #[error("Device error: {0}")]
    Device(#[source] io::Error),

    #[error("Invalid melody: {0}")]
    InvalidMelody(String),

    #[error("Operation timed out")]
    Timeout,
}

impl From<io::Error> for SpeakerError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::AddrInUse => SpeakerError::DeviceBusy,
            _ if err.raw_os_error() == Some(EBUSY) => SpeakerError::DeviceBusy,
            _ => SpeakerError::Device(err),
        }
    }
}

impl IntoResponse for SpeakerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SpeakerError::InvalidMelody(msg) => (StatusCode::BAD_REQUEST, msg),
            SpeakerError::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Device busy - request timed out".to_string(),
            ),
            SpeakerError::DeviceBusy => (StatusCode::SERVICE_UNAVAILABLE, "Device busy".to_string()),
            SpeakerError::Device(ref e) => {
                tracing::error!("Device error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Device error: {}", e))
            }
        };

        (status, message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
