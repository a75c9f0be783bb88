//! CLI argument definitions using clap derive

use crate::config::DEFAULT_CONFIG_PATH;
use crate::logging::DEFAULT_LOG_PATH;
use crate::sampler::DiskSampler;

use clap::Parser;
use std::path::PathBuf;

/// Host resource monitor
///
/// Samples CPU, memory and disk usage, logs a status line per check and emails
/// an alert whenever a reading exceeds its configured threshold. Runs until
/// killed.
#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (JSON, or TOML by extension)
    #[arg(default_value = DEFAULT_CONFIG_PATH, env = "HOSTWATCH_CONFIG")]
    pub config: PathBuf,

    /// Status log file (appended to)
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,

    /// Path whose filesystem the disk check watches
    #[arg(long, default_value = DiskSampler::DEFAULT_PATH)]
    pub disk_path: PathBuf,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose console output
    #[arg(short, long)]
    pub verbose: bool,
}
