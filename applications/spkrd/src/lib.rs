//! spkrd Library
//!
//! Network server for the FreeBSD speaker device: melodies arrive as
//! `PUT /play` request bodies and are written to `/dev/speaker`.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod server;
pub mod speaker;

// Re-export commonly used types for convenience
pub use config::SpkrdConfig;
pub use error::{ConfigError, SpeakerError};
pub use server::{create_router, serve, AppState};
pub use speaker::Speaker;
