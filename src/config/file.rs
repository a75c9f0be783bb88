//! Configuration file loading
//!
//! Handles reading and writing the configuration file as JSON or TOML.

use crate::config::RawConfig;
use crate::error::ConfigError;

use std::path::Path;

/// On-disk format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Read a configuration file without validating it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RawConfig, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Decode configuration text
    pub fn parse(content: &str, format: ConfigFormat) -> Result<RawConfig, ConfigError> {
        let raw = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(raw)
    }

    /// Write a configuration file
    pub fn save<P: AsRef<Path>>(raw: &RawConfig, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let contents = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(raw)
                .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
            ConfigFormat::Toml => toml::to_string_pretty(raw)
                .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}
