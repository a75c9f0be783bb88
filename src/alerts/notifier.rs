//! Alert notification channels
//!
//! Email over SMTP is the only delivery channel. The [`Notifier`] trait keeps
//! the dispatcher independent of the transport.

use super::types::{Alert, ALERT_SUBJECT};
use crate::config::EmailConfig;
use crate::error::NotifyError;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Notification channel trait
pub trait Notifier: Send {
    /// Send a notification for an alert
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Sends alerts as plain-text email through a STARTTLS relay
///
/// Each alert opens its own session, authenticates, sends one message and
/// quits. Nothing is kept open between alerts.
pub struct EmailNotifier {
    server: String,
    port: u16,
    credentials: Credentials,
    from: String,
    to: String,
}

impl EmailNotifier {
    /// Create a notifier from the email section of the configuration
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            server: config.smtp_server.clone(),
            port: config.smtp_port,
            credentials: Credentials::new(config.smtp_user.clone(), config.smtp_password.clone()),
            from: config.from_email.clone(),
            to: config.to_email.clone(),
        }
    }

    /// Build the message for an alert
    pub fn compose(&self, alert: &Alert) -> Result<Message, NotifyError> {
        Message::builder()
            .from(parse_mailbox(&self.from)?)
            .to(parse_mailbox(&self.to)?)
            .subject(ALERT_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(alert.message())
            .map_err(|e| NotifyError::Message(e.to_string()))
    }

    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let mailer = SmtpTransport::starttls_relay(&self.server)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();
        Ok(mailer)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        })
}

impl Notifier for EmailNotifier {
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        let message = self.compose(alert)?;
        let mailer = self.transport()?;

        log::debug!(
            "Sending alert to {} via {}:{}",
            self.to,
            self.server,
            self.port
        );
        mailer
            .send(&message)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}
