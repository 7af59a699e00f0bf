//! Reader configuration.
//!
//! The device keeps a small JSON config file with its notification
//! preferences; this is the Rust rendition. Every field has a default, so a
//! missing or partial file degrades gracefully instead of failing the boot.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiegand_core::constants::DEFAULT_QUIET_WINDOW_US;
use wiegand_core::{Error, Result};

/// SMTP collaborator settings.
///
/// Carried opaquely for the notification transport; nothing in this
/// workspace dials SMTP itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            user: "sender@example.com".to_string(),
            password: String::new(),
            recipient: "recipient@example.com".to_string(),
        }
    }
}

/// Top-level reader configuration.
///
/// # Examples
///
/// ```
/// use wiegand_pipeline::ReaderConfig;
///
/// let config: ReaderConfig = serde_json::from_str(
///     r#"{ "enable_notifications": true }"#,
/// ).unwrap();
/// assert!(config.enable_notifications);
/// assert_eq!(config.quiet_window().as_micros(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Line-silence window that terminates a frame, in microseconds.
    pub quiet_window_us: u64,

    /// Forward good reads to the notifier.
    pub enable_notifications: bool,

    /// CSV card log location.
    pub log_path: PathBuf,

    /// Notification transport settings.
    pub smtp: SmtpConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            quiet_window_us: DEFAULT_QUIET_WINDOW_US,
            enable_notifications: false,
            log_path: PathBuf::from("cards.csv"),
            smtp: SmtpConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load from a JSON file, falling back to defaults when it is absent.
    ///
    /// # Errors
    /// Returns `Error::Config` only when the file exists but cannot be read
    /// or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The quiet window as a [`Duration`].
    #[must_use]
    pub fn quiet_window(&self) -> Duration {
        Duration::from_micros(self.quiet_window_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.quiet_window_us, DEFAULT_QUIET_WINDOW_US);
        assert!(!config.enable_notifications);
        assert_eq!(config.log_path, PathBuf::from("cards.csv"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{ "quiet_window_us": 5000 }"#).unwrap();
        assert_eq!(config.quiet_window().as_micros(), 5000);
        assert!(!config.enable_notifications);
        assert_eq!(config.smtp, SmtpConfig::default());
    }

    #[test]
    fn test_full_roundtrip() {
        let mut config = ReaderConfig::default();
        config.enable_notifications = true;
        config.smtp.recipient = "ops@example.net".into();
        let json = serde_json::to_string(&config).unwrap();
        let back: ReaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ReaderConfig::load_or_default("/nonexistent/config.json").unwrap();
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let path = std::env::temp_dir().join(format!(
            "wiegand-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        let err = ReaderConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let _ = std::fs::remove_file(&path);
    }
}
