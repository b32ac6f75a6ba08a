//! Transport seam between request construction and the network.
//!
//! [`HttpTransport`] is the real implementation on top of `reqwest`. Tests
//! substitute their own [`Transport`] to drive status classification without
//! a socket.

use crate::error::Result;
use crate::types::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// A received response whose body has not been read yet.
#[async_trait]
pub trait PlayResponse: Send {
    /// Numeric HTTP status.
    fn status(&self) -> u16;

    /// Consume the response and read the whole body as text.
    async fn text(self) -> Result<String>;
}

/// Sends a single PUT request.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: PlayResponse;

    /// Send `body` verbatim to `url` with the PUT method.
    async fn put(&self, url: &str, body: String) -> Result<Self::Response>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build the underlying HTTP client from the config.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = HttpResponse;

    async fn put(&self, url: &str, body: String) -> Result<HttpResponse> {
        debug!(url = %url, bytes = body.len(), "Sending PUT request");
        let response = self.http.put(url).body(body).send().await?;
        debug!(status = %response.status(), "Received response");
        Ok(HttpResponse(response))
    }
}

/// Response returned by [`HttpTransport`].
#[derive(Debug)]
pub struct HttpResponse(reqwest::Response);

#[async_trait]
impl PlayResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    async fn text(self) -> Result<String> {
        Ok(self.0.text().await?)
    }
}
