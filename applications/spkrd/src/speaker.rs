/// Speaker device access with busy-retry
use crate::error::SpeakerError;
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::{sleep, Instant};

/// Longest melody accepted, in bytes.
pub const MAX_MELODY_LEN: usize = 1000;

/// Pause between attempts while the device is busy.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Writes melodies to a speaker device node.
#[derive(Debug, Clone)]
pub struct Speaker {
    device: PathBuf,
    retry_timeout: Duration,
}

impl Speaker {
    pub fn new(device: impl Into<PathBuf>, retry_timeout: Duration) -> Self {
        Self {
            device: device.into(),
            retry_timeout,
        }
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Validate and play a melody for `client_addr`.
    ///
    /// While the device reports busy the write is retried until the retry
    /// timeout runs out.
    pub async fn play(&self, melody: &str, client_addr: SocketAddr) -> Result<(), SpeakerError> {
        validate_melody(melody)?;

        tracing::info!(
            client = %client_addr.ip(),
            melody = %printable(melody),
            "Melody request"
        );

        let device = self.device.as_path();
        retry_while_busy(self.retry_timeout, RETRY_INTERVAL, move || {
            write_melody(device, melody)
        })
        .await
    }
}

pub fn validate_melody(melody: &str) -> Result<(), SpeakerError> {
    if melody.len() > MAX_MELODY_LEN {
        return Err(melody_too_long());
    }
    Ok(())
}

pub fn melody_too_long() -> SpeakerError {
    SpeakerError::InvalidMelody(format!("Melody exceeds {} characters", MAX_MELODY_LEN))
}

/// Melody text safe to put in a log line.
pub fn printable(melody: &str) -> String {
    melody
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_punctuation() || c.is_ascii_whitespace())
        .collect()
}

/// Run `attempt` until it stops reporting [`SpeakerError::DeviceBusy`].
///
/// Gives up with [`SpeakerError::Timeout`] once `timeout` has elapsed since
/// the first attempt. Other errors are returned immediately.
pub async fn retry_while_busy<F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut attempt: F,
) -> Result<(), SpeakerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), SpeakerError>>,
{
    let start = Instant::now();

    loop {
        match attempt().await {
            Err(SpeakerError::DeviceBusy) => {
                if start.elapsed() >= timeout {
                    tracing::warn!(?timeout, "Speaker still busy, giving up");
                    return Err(SpeakerError::Timeout);
                }
                tracing::debug!(?interval, "Speaker busy, retrying");
                sleep(interval).await;
            }
            other => return other,
        }
    }
}

async fn write_melody(device: &Path, melody: &str) -> Result<(), SpeakerError> {
    let mut file = OpenOptions::new().write(true).open(device).await?;
    file.write_all(melody.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> SocketAddr {
        SocketAddr::from(([192, 168, 1, 20], 51000))
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_melody("").is_ok());
        assert!(validate_melody(&"c".repeat(MAX_MELODY_LEN)).is_ok());

        match validate_melody(&"c".repeat(MAX_MELODY_LEN + 1)) {
            Err(SpeakerError::InvalidMelody(msg)) => {
                assert_eq!(msg, "Melody exceeds 1000 characters");
            }
            other => panic!("Expected InvalidMelody, got: {:?}", other),
        }
    }

    #[test]
    fn test_printable_strips_control_and_non_ascii() {
        assert_eq!(printable("t120 l8 cdefgab"), "t120 l8 cdefgab");
        assert_eq!(printable("c\u{1b}[31md♪e"), "c[31mde");
        assert_eq!(printable("o3\n>c#"), "o3\n>c#");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_until_free() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;

        let result = retry_while_busy(Duration::from_secs(30), RETRY_INTERVAL, move || async move {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(SpeakerError::DeviceBusy)
            } else {
                Ok(())
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_times_out() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let start = Instant::now();

        let result = retry_while_busy(Duration::from_secs(3), RETRY_INTERVAL, move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SpeakerError::DeviceBusy)
        })
        .await;

        assert!(matches!(result, Err(SpeakerError::Timeout)));
        // t=0, 1, 2, 3
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_device_error_is_not_retried() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;

        let result = retry_while_busy(Duration::from_secs(30), RETRY_INTERVAL, move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SpeakerError::Device(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            )))
        })
        .await;

        assert!(matches!(result, Err(SpeakerError::Device(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_play_writes_to_device() {
        let device = tempfile::NamedTempFile::new().unwrap();
        let speaker = Speaker::new(device.path(), Duration::from_secs(1));

        speaker.play("cdefgab", client()).await.unwrap();

        assert_eq!(std::fs::read_to_string(device.path()).unwrap(), "cdefgab");
    }

    #[tokio::test]
    async fn test_play_rejects_long_melody_without_writing() {
        let device = tempfile::NamedTempFile::new().unwrap();
        let speaker = Speaker::new(device.path(), Duration::from_secs(1));

        let result = speaker.play(&"c".repeat(1001), client()).await;

        assert!(matches!(result, Err(SpeakerError::InvalidMelody(_))));
        assert_eq!(std::fs::read_to_string(device.path()).unwrap(), "");
    }

    #[tokio::test]
    async fn test_play_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let speaker = Speaker::new(dir.path().join("speaker"), Duration::from_secs(1));

        let result = speaker.play("c", client()).await;

        assert!(matches!(result, Err(SpeakerError::Device(_))));
        assert!(!dir.path().join("speaker").exists());
    }
}
