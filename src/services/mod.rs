//! Service layer
//!
//! Services encapsulate the polling loop that ties sampling, alerting and
//! logging together.

pub mod monitor;

pub use monitor::{Monitor, MonitorConfig, Reading};
