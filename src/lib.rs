//! hostwatch - single-host resource monitor
//!
//! This library samples CPU, memory and disk utilization, compares each
//! reading against a configured threshold, keeps a plain-text status log and
//! emails an alert on every breach.
//!
//! # Modules
//!
//! - [`alerts`]: Alert types and email delivery
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and validation
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`logging`]: Persistent status log
//! - [`sampler`]: Host metric samplers
//! - [`services`]: The polling monitor

pub mod alerts;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod sampler;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
