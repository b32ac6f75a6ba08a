//! Client configuration and request addressing.

use std::time::Duration;

/// Fixed path of the play endpoint, appended to the server base URL.
pub const PLAY_PATH: &str = "/play";

/// Configuration for talking to a spkrd server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://192.168.1.100:8080"), used verbatim
    pub url: String,
    /// Whole-request timeout. `None` leaves the HTTP library's default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config with just the server URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Set a request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Build the play URL for a server base URL.
///
/// The base is not parsed or normalized; a malformed value only shows up
/// once the request is sent.
pub fn play_url(server_url: &str) -> String {
    format!("{}{}", server_url, PLAY_PATH)
}
