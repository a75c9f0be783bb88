//! Alert and notification system
//!
//! Builds alerts from threshold breaches and delivers them by email.

mod dispatcher;
mod notifier;
mod types;

pub use dispatcher::{AlertDispatcher, Delivery};
pub use notifier::{EmailNotifier, Notifier};
pub use types::{Alert, ALERT_SUBJECT};
