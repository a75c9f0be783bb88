//! Alert dispatch
//!
//! The dispatcher is a no-op when email is disabled. Delivery failures are
//! returned to the caller as values; it is the caller's job to log them and
//! carry on.

use super::notifier::{EmailNotifier, Notifier};
use super::types::Alert;
use crate::config::EmailConfig;
use crate::error::NotifyError;

/// Outcome of a successful dispatch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The notifier accepted the alert
    Sent,
    /// Notifications are switched off; nothing was attempted
    Disabled,
}

/// Routes alerts to the configured notifier, if any
pub struct AlertDispatcher {
    notifier: Option<Box<dyn Notifier>>,
}

impl AlertDispatcher {
    /// Create a dispatcher from the email section of the configuration
    pub fn from_config(config: &EmailConfig) -> Self {
        if config.enabled {
            Self::with_notifier(Box::new(EmailNotifier::new(config)))
        } else {
            Self::disabled()
        }
    }

    /// Create a dispatcher that delivers through `notifier`
    pub fn with_notifier(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
        }
    }

    /// Create a disabled dispatcher (no-op)
    pub fn disabled() -> Self {
        Self { notifier: None }
    }

    /// Check if delivery is switched on
    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Deliver one alert
    ///
    /// No retry: a failed send is reported once and the alert is dropped.
    pub fn dispatch(&self, alert: &Alert) -> Result<Delivery, NotifyError> {
        match &self.notifier {
            None => Ok(Delivery::Disabled),
            Some(notifier) => {
                log::debug!("Dispatching alert via {}", notifier.name());
                notifier.notify(alert)?;
                Ok(Delivery::Sent)
            }
        }
    }
}
