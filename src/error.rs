//! Unified error types for hostwatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while reading a host metric
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Percentage outside 0-100 (or not a number)
    #[error("Invalid percentage: {0} (must be 0-100)")]
    InvalidPercentage(f64),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found or unreadable
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration could not be encoded for writing
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(String),

    /// Configuration file could not be written
    #[error("Failed to write configuration to {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors from metric samplers
#[derive(Error, Debug)]
pub enum SampleError {
    /// The path handed to a sampler could not be read
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS reported no usable counters
    #[error("Metric unavailable: {0}")]
    Unavailable(String),
}

impl SampleError {
    /// The underlying I/O error kind, if this is an I/O failure
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            SampleError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Errors from alert delivery
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Sender or recipient address is not a valid mailbox
    #[error("Invalid email address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// The message could not be composed
    #[error("Failed to build message: {0}")]
    Message(String),

    /// Connection, TLS, authentication or transmission failure
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
