//! Alert domain types

use crate::domain::{Metric, Threshold, Usage};
use std::fmt;

/// Subject line of every alert email
pub const ALERT_SUBJECT: &str = "System Alert";

/// A threshold breach worth telling someone about
///
/// Alerts are ephemeral: one is built per breach per iteration and dropped
/// once dispatch returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Which metric breached
    pub metric: Metric,
    /// The reading that breached
    pub value: Usage,
    /// The limit it breached
    pub threshold: Threshold,
}

impl Alert {
    pub fn new(metric: Metric, value: Usage, threshold: Threshold) -> Self {
        Self {
            metric,
            value,
            threshold,
        }
    }

    /// Notification text, e.g. `High CPU usage: 85.0%`
    pub fn message(&self) -> String {
        format!("High {} usage: {}", self.metric.name(), self.value)
    }

    /// Status log text, e.g. `High CPU usage detected: 85.0%`
    pub fn log_message(&self) -> String {
        format!("High {} usage detected: {}", self.metric.name(), self.value)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (limit {})", self.message(), self.threshold)
    }
}
