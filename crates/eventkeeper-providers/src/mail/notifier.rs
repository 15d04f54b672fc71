//! Email reminders for event attendees.
//!
//! Each call opens one session and sends an individual message to every
//! recipient. A recipient that fails (bad address, rejected by the server) is
//! recorded in the [`DeliveryReport`] and the loop moves on to the next one.

use chrono::NaiveDateTime;
use eventkeeper_core::format_display;
use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use tracing::{debug, error, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::provider::{BoxFuture, DeliveryReport, ReminderNotifier};

use super::config::MailConfig;
use super::transport::{MailTransport, SmtpRelay};

/// Sends reminder emails through a [`MailTransport`].
pub struct EmailNotifier<T = SmtpRelay> {
    config: MailConfig,
    transport: T,
}

impl EmailNotifier<SmtpRelay> {
    /// Creates a notifier that talks SMTP to the configured server.
    pub fn new(config: MailConfig) -> Self {
        let transport = SmtpRelay::from_config(&config);
        Self { config, transport }
    }
}

impl<T: MailTransport> EmailNotifier<T> {
    /// Creates a notifier over a custom transport.
    pub fn with_transport(config: MailConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns true if credentials are configured.
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Sends a reminder for `event_name` to every recipient.
    pub async fn deliver_reminder(
        &self,
        event_name: &str,
        start_time: NaiveDateTime,
        recipients: &[String],
    ) -> DeliveryReport {
        let Some(ref credentials) = self.config.credentials else {
            warn!(
                event = %event_name,
                "Email credentials not configured (EMAIL_ADDRESS/EMAIL_PASSWORD), skipping reminder delivery"
            );
            return DeliveryReport::disabled();
        };

        if recipients.is_empty() {
            debug!(event = %event_name, "No recipients, nothing to send");
            return DeliveryReport::default();
        }

        let sender = match credentials.address().parse::<Mailbox>() {
            Ok(sender) => sender,
            Err(e) => {
                let e = ServiceError::configuration(format!(
                    "EMAIL_ADDRESS '{}' is not a valid address",
                    credentials.address()
                ))
                .with_service("smtp")
                .with_source(e);
                error!(error = %e, "Cannot send reminders");
                return DeliveryReport::session_failed(e);
            }
        };

        let mut session = match self.transport.open_session(credentials).await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, event = %event_name, "Failed to open mail session");
                return DeliveryReport::session_failed(e);
            }
        };

        let mut report = DeliveryReport::default();
        for recipient in recipients {
            let outcome = match compose_reminder(&sender, recipient, event_name, start_time) {
                Ok(message) => session.deliver(message).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => {
                    info!(recipient = %recipient, event = %event_name, "Reminder email sent");
                    report.record_delivered(recipient.clone());
                }
                Err(e) => {
                    error!(
                        error = %e,
                        recipient = %recipient,
                        event = %event_name,
                        "Failed to send reminder email"
                    );
                    report.record_failure(recipient.clone(), e);
                }
            }
        }
        session.close().await;

        report
    }
}

impl<T: MailTransport> ReminderNotifier for EmailNotifier<T> {
    fn name(&self) -> &str {
        "email"
    }

    fn send_reminder<'a>(
        &'a self,
        event_name: &'a str,
        start_time: NaiveDateTime,
        recipients: &'a [String],
    ) -> BoxFuture<'a, DeliveryReport> {
        Box::pin(self.deliver_reminder(event_name, start_time, recipients))
    }
}

/// Builds the reminder message for one recipient.
fn compose_reminder(
    sender: &Mailbox,
    recipient: &str,
    event_name: &str,
    start_time: NaiveDateTime,
) -> ServiceResult<Message> {
    let to = recipient.trim().parse::<Mailbox>().map_err(|e| {
        ServiceError::invalid_address(format!("'{}' is not a valid email address", recipient))
            .with_service("smtp")
            .with_source(e)
    })?;

    Message::builder()
        .from(sender.clone())
        .to(to)
        .subject(format!("Reminder: {}", event_name))
        .header(ContentType::TEXT_PLAIN)
        .body(format!(
            "Hello,\n\nThis is a reminder that the event '{}' is starting soon at {}.\n",
            event_name,
            format_display(&start_time)
        ))
        .map_err(|e| {
            ServiceError::invalid_address(format!("failed to build message for '{}'", recipient))
                .with_service("smtp")
                .with_source(e)
        })
}
