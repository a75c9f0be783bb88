//! Polling monitor
//!
//! Samples every configured metric, raises alerts on breaches, writes a status
//! line and sleeps. Any sampling failure is logged and retried after a fixed
//! delay; the loop itself never ends.

use crate::alerts::{Alert, AlertDispatcher, Delivery};
use crate::config::Config;
use crate::domain::{Metric, Threshold, Usage};
use crate::error::AppError;
use crate::logging::StatusLog;
use crate::sampler::{CpuSampler, DiskSampler, MemorySampler, Sampler};

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between successful iterations
    pub interval: Duration,
    /// Interval after a failed iteration
    pub retry_interval: Duration,
    /// Path whose filesystem the disk check watches
    pub disk_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            retry_interval: Duration::from_secs(10),
            disk_path: PathBuf::from(DiskSampler::DEFAULT_PATH),
        }
    }
}

impl From<&Config> for MonitorConfig {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.check_interval,
            retry_interval: config.error_retry_interval,
            ..Self::default()
        }
    }
}

/// One sampler paired with its alert limit
struct Check {
    sampler: Box<dyn Sampler>,
    threshold: Threshold,
}

/// Result of one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub metric: Metric,
    pub value: Usage,
    pub breached: bool,
}

/// Render the per-iteration summary line
pub fn status_line(readings: &[Reading]) -> String {
    let parts: Vec<String> = readings
        .iter()
        .map(|r| format!("{}: {}", r.metric.label(), r.value))
        .collect();
    format!("System status - {}", parts.join(", "))
}

/// Polling monitor
pub struct Monitor {
    config: MonitorConfig,
    checks: Vec<Check>,
    dispatcher: AlertDispatcher,
    log: StatusLog,
}

impl Monitor {
    /// Create a monitor with no checks
    pub fn new(config: MonitorConfig, dispatcher: AlertDispatcher, log: StatusLog) -> Self {
        Self {
            config,
            checks: Vec::new(),
            dispatcher,
            log,
        }
    }

    /// Create the standard CPU, memory and disk monitor for this host
    pub fn for_host(config: MonitorConfig, settings: &Config, log: StatusLog) -> Self {
        let disk = DiskSampler::new(config.disk_path.clone());
        let dispatcher = AlertDispatcher::from_config(&settings.email);

        Self::new(config, dispatcher, log)
            .with_check(Box::new(CpuSampler::new()), settings.cpu_threshold)
            .with_check(Box::new(MemorySampler::new()), settings.memory_threshold)
            .with_check(Box::new(disk), settings.disk_threshold)
    }

    /// Add a check; checks run in the order they were added
    pub fn with_check(mut self, sampler: Box<dyn Sampler>, threshold: Threshold) -> Self {
        self.checks.push(Check { sampler, threshold });
        self
    }

    /// Execute one iteration: sample, alert, write the status line
    ///
    /// Stops at the first sampling error. Alert delivery errors never stop it.
    pub fn tick(&mut self) -> Result<Vec<Reading>, AppError> {
        let Self {
            checks,
            dispatcher,
            log,
            ..
        } = self;

        let mut readings = Vec::with_capacity(checks.len());
        for check in checks.iter_mut() {
            let metric = check.sampler.metric();
            let value = check.sampler.sample()?;
            let breached = check.threshold.is_breached_by(value);

            if breached {
                let alert = Alert::new(metric, value, check.threshold);
                raise(dispatcher, log, &alert);
            }

            readings.push(Reading {
                metric,
                value,
                breached,
            });
        }

        log.info(status_line(&readings));
        Ok(readings)
    }

    /// Run the loop until the process is killed
    pub fn run(&mut self) -> ! {
        log::info!(
            "Monitoring {} metric(s) every {:?}",
            self.checks.len(),
            self.config.interval
        );
        loop {
            let delay = self.iterate();
            std::thread::sleep(delay);
        }
    }

    /// Run exactly `iterations` iterations
    ///
    /// Same semantics as [`Monitor::run`], except that there is no pause after
    /// the final iteration.
    pub fn run_iterations(&mut self, iterations: u64) {
        for i in 0..iterations {
            let delay = self.iterate();
            if i + 1 < iterations {
                std::thread::sleep(delay);
            }
        }
    }

    /// Run one iteration and return the pause that must follow it
    ///
    /// A clean iteration waits the check interval; a failed one logs the
    /// error and waits the retry interval instead.
    pub fn iterate(&mut self) -> Duration {
        match self.tick() {
            Ok(_) => self.config.interval,
            Err(e) => {
                self.log.error(format!("Monitoring error: {}", e));
                self.config.retry_interval
            }
        }
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

/// Dispatch an alert and record the outcome
fn raise(dispatcher: &AlertDispatcher, log: &mut StatusLog, alert: &Alert) {
    match dispatcher.dispatch(alert) {
        Ok(Delivery::Sent) => log.info(format!("Alert sent: {}", alert.message())),
        Ok(Delivery::Disabled) => {}
        Err(e) => log.error(format!("Failed to send alert: {}", e)),
    }
    log.warning(alert.log_message());
}
