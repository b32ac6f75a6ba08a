//! Main spkrd client.

use crate::error::{PlayError, Result};
use crate::transport::{HttpTransport, PlayResponse, Transport};
use crate::types::{play_url, ClientConfig};
use reqwest::StatusCode;
use tracing::{debug, info};

/// Client for a single spkrd server.
///
/// Each [`play`](Self::play) call issues exactly one request. Nothing is
/// retried.
///
/// # Example
///
/// ```ignore
/// use spkr_client::{ClientConfig, SpkrClient};
///
/// let client = SpkrClient::new(ClientConfig::new("http://localhost:8080"))?;
/// client.play("t120 l8 cdefgab").await?;
/// ```
#[derive(Debug)]
pub struct SpkrClient<T = HttpTransport> {
    transport: T,
    url: String,
}

impl SpkrClient<HttpTransport> {
    /// Create a client backed by a real HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, &config.url))
    }
}

impl<T: Transport> SpkrClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, server_url: &str) -> Self {
        Self {
            transport,
            url: play_url(server_url),
        }
    }

    /// Full URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a melody to the server and wait for it to be played.
    ///
    /// The melody is sent as-is; its grammar is checked by the server.
    pub async fn play(&self, melody: &str) -> Result<()> {
        debug!(url = %self.url, melody = %melody, "Sending melody");
        let response = self.transport.put(&self.url, melody.to_owned()).await?;
        let outcome = classify(response).await;
        if outcome.is_ok() {
            info!(url = %self.url, "Melody played");
        }
        outcome
    }
}

/// Map a server response onto the play outcome.
///
/// | status | result |
/// |---|---|
/// | 200 | `Ok(())` |
/// | 400 | [`PlayError::InvalidMelody`] with the body |
/// | 503 | [`PlayError::DeviceBusy`] with the body |
/// | 500 | [`PlayError::Server`] with the body |
/// | other | [`PlayError::UnexpectedStatus`] |
///
/// The response is consumed on every branch.
pub async fn classify<R: PlayResponse>(response: R) -> Result<()> {
    match response.status() {
        200 => Ok(()),
        400 => Err(PlayError::InvalidMelody(read_body(response, 400).await)),
        503 => Err(PlayError::DeviceBusy(read_body(response, 503).await)),
        500 => Err(PlayError::Server(read_body(response, 500).await)),
        status => Err(PlayError::UnexpectedStatus(status)),
    }
}

/// Read an error body, falling back to the reason phrase if the stream breaks.
async fn read_body<R: PlayResponse>(response: R, status: u16) -> String {
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!(status, error = %e, "Failed to read error body");
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string()
        }
    }
}
