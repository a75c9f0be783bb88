//! Configuration system
//!
//! The configuration file is a flat key/value mapping. It is decoded into
//! [`RawConfig`], where every key is optional, and then validated into the
//! typed [`Config`]. Validation is fail-fast: a missing key or an out-of-range
//! value is reported at load time, never at first use.

pub mod file;

pub use file::{ConfigFile, ConfigFormat};

use crate::domain::Threshold;
use crate::error::ConfigError;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "monitor_config.json";

/// Validated agent configuration
///
/// Loaded once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CPU alert limit
    pub cpu_threshold: Threshold,
    /// Memory alert limit
    pub memory_threshold: Threshold,
    /// Disk alert limit
    pub disk_threshold: Threshold,
    /// Mail relay settings
    pub email: EmailConfig,
    /// Pause between successful iterations
    pub check_interval: Duration,
    /// Pause after a failed iteration
    pub error_retry_interval: Duration,
}

/// SMTP settings for alert delivery
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_email: String,
    pub to_email: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("to_email", &self.to_email)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigFile::load(path)?.validate()
    }

    /// Save configuration to a file, in the format implied by its extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        ConfigFile::save(&RawConfig::from(self), path)
    }
}

/// Configuration as it appears on disk
///
/// Every key is optional here so that absent keys can be reported by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_retry_interval: Option<u64>,
}

fn require<T>(value: Option<T>, key: &str) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingField(key.to_string()))
}

fn threshold(value: Option<f64>, key: &str) -> Result<Threshold, ConfigError> {
    Threshold::new(require(value, key)?).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn interval(value: Option<u64>, key: &str) -> Result<Duration, ConfigError> {
    match require(value, key)? {
        0 => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be a positive number of seconds".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

fn mailbox(address: &str, key: &str) -> Result<(), ConfigError> {
    address
        .parse::<Mailbox>()
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

impl RawConfig {
    /// Check every required key and convert into a [`Config`]
    ///
    /// Keys are checked in file order so the first missing one is reported.
    pub fn validate(self) -> Result<Config, ConfigError> {
        let cpu_threshold = threshold(self.cpu_threshold, "cpu_threshold")?;
        let memory_threshold = threshold(self.memory_threshold, "memory_threshold")?;
        let disk_threshold = threshold(self.disk_threshold, "disk_threshold")?;

        let email = EmailConfig {
            enabled: require(self.email_enabled, "email_enabled")?,
            smtp_server: require(self.smtp_server, "smtp_server")?,
            smtp_port: require(self.smtp_port, "smtp_port")?,
            smtp_user: require(self.smtp_user, "smtp_user")?,
            smtp_password: require(self.smtp_password, "smtp_password")?,
            from_email: require(self.from_email, "from_email")?,
            to_email: require(self.to_email, "to_email")?,
        };

        let check_interval = interval(self.check_interval, "check_interval")?;
        let error_retry_interval = interval(self.error_retry_interval, "error_retry_interval")?;

        // Relay and addresses only matter once delivery is switched on
        if email.enabled {
            if email.smtp_server.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "smtp_server".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if email.smtp_port == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "smtp_port".to_string(),
                    message: "must be between 1 and 65535".to_string(),
                });
            }
            mailbox(&email.from_email, "from_email")?;
            mailbox(&email.to_email, "to_email")?;
        }

        Ok(Config {
            cpu_threshold,
            memory_threshold,
            disk_threshold,
            email,
            check_interval,
            error_retry_interval,
        })
    }
}

impl From<&Config> for RawConfig {
    fn from(config: &Config) -> Self {
        Self {
            cpu_threshold: Some(config.cpu_threshold.as_percent()),
            memory_threshold: Some(config.memory_threshold.as_percent()),
            disk_threshold: Some(config.disk_threshold.as_percent()),
            email_enabled: Some(config.email.enabled),
            smtp_server: Some(config.email.smtp_server.clone()),
            smtp_port: Some(config.email.smtp_port),
            smtp_user: Some(config.email.smtp_user.clone()),
            smtp_password: Some(config.email.smtp_password.clone()),
            from_email: Some(config.email.from_email.clone()),
            to_email: Some(config.email.to_email.clone()),
            check_interval: Some(config.check_interval.as_secs()),
            error_retry_interval: Some(config.error_retry_interval.as_secs()),
        }
    }
}
