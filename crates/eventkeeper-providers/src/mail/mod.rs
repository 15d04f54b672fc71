//! Email delivery of event reminders over SMTP.

mod config;
mod notifier;
mod transport;

pub use config::{MailConfig, MailCredentials};
pub use notifier::EmailNotifier;
pub use transport::{MailSession, MailTransport, SmtpRelay};
