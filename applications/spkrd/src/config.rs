/// Server configuration
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "spkrd.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpkrdConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds to keep retrying while the device is busy
    #[serde(default = "default_retry_timeout")]
    pub retry_timeout: u64,

    #[serde(default = "default_device")]
    pub device: PathBuf,
}

impl SpkrdConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `spkrd.toml` is read if present.
    /// `SPKRD_PORT`, `SPKRD_RETRY_TIMEOUT` and `SPKRD_DEVICE` override the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SPKRD_)
        settings = settings.add_source(config::Environment::with_prefix("SPKRD").try_parsing(true));

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }

        if self.retry_timeout == 0 {
            return Err(ConfigError::Invalid(
                "retry_timeout must be at least 1 second".to_string(),
            ));
        }

        if self.device.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("device path must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn retry_timeout(&self) -> Duration {
        Duration::from_secs(self.retry_timeout)
    }
}

impl Default for SpkrdConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            retry_timeout: default_retry_timeout(),
            device: default_device(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_retry_timeout() -> u64 {
    30
}

fn default_device() -> PathBuf {
    PathBuf::from("/dev/speaker")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SpkrdConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.retry_timeout(), Duration::from_secs(30));
        assert_eq!(config.device, PathBuf::from("/dev/speaker"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "port = 9090\nretry_timeout = 5\ndevice = \"/tmp/speaker\"").unwrap();

        let config = SpkrdConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.retry_timeout, 5);
        assert_eq!(config.device, PathBuf::from("/tmp/speaker"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "retry_timeout = 2").unwrap();

        let config = SpkrdConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.retry_timeout, 2);
        assert_eq!(config.device, PathBuf::from("/dev/speaker"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SpkrdConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SpkrdConfig {
            port: 0,
            ..SpkrdConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SpkrdConfig {
            retry_timeout: 0,
            ..SpkrdConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SpkrdConfig {
            device: PathBuf::new(),
            ..SpkrdConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
