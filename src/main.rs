//! hostwatch - single-host resource monitor
//!
//! Polls CPU, memory and disk usage until killed, logging every check and
//! emailing an alert whenever a threshold is exceeded.

use clap::Parser;
use hostwatch::cli::Cli;
use hostwatch::config::Config;
use hostwatch::error::{AppError, ConfigError};
use hostwatch::logging::StatusLog;
use hostwatch::services::{Monitor, MonitorConfig};

fn main() {
    let cli = Cli::parse();

    // Initialize console logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let settings = Config::load(&cli.config)?;
    log::debug!("Loaded {:?}", settings);

    let status_log = StatusLog::open(&cli.log_file)?;
    log::info!("Writing status log to {}", cli.log_file.display());

    let monitor_config = MonitorConfig {
        disk_path: cli.disk_path.clone(),
        ..MonitorConfig::from(&settings)
    };
    let mut monitor = Monitor::for_host(monitor_config, &settings, status_log);

    if cli.once {
        monitor.run_iterations(1);
        return Ok(());
    }

    monitor.run()
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Pass the configuration path as the first argument,");
            eprintln!("      or create monitor_config.json in the working directory.");
        }
        AppError::Config(ConfigError::MissingField(_)) => {
            eprintln!();
            eprintln!("Hint: Every configuration key is required; there are no defaults.");
        }
        _ => {}
    }
}
