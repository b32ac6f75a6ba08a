//! spkrd client
//!
//! HTTP client library for sending melodies to a spkrd server.
//!
//! A single operation is exposed: `PUT {server_url}/play` with the melody as
//! the raw request body. The server's status code is mapped onto
//! [`PlayError`] so callers can report each failure category separately.
//!
//! # Example
//!
//! ```ignore
//! use spkr_client::{ClientConfig, SpkrClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpkrClient::new(ClientConfig::new("http://192.168.1.100:8080"))?;
//!     client.play("cdefgab").await?;
//!     println!("Melody played");
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod transport;
mod types;

pub use client::{classify, SpkrClient};
pub use error::{PlayError, Result};
pub use transport::{HttpResponse, HttpTransport, PlayResponse, Transport};
pub use types::{play_url, ClientConfig, PLAY_PATH};
