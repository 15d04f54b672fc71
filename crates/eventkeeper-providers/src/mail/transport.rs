//! Mail transport abstraction and its SMTP implementation.
//!
//! A [`MailTransport`] opens one authenticated [`MailSession`] per reminder;
//! the session then delivers one message per recipient over the same
//! connection, so each reminder logs in once.

use std::time::Duration;

use lettre::Message;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{AsyncSmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::provider::BoxFuture;

use super::config::{MailConfig, MailCredentials};

/// An authenticated connection able to deliver messages.
pub trait MailSession: Send {
    /// Delivers one message.
    fn deliver(&mut self, message: Message) -> BoxFuture<'_, ServiceResult<()>>;

    /// Ends the session. Errors are not reported.
    fn close(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

/// Opens mail sessions.
pub trait MailTransport: Send + Sync {
    /// Opens and authenticates a new session.
    fn open_session<'a>(
        &'a self,
        credentials: &'a MailCredentials,
    ) -> BoxFuture<'a, ServiceResult<Box<dyn MailSession>>>;
}

/// SMTP over implicit TLS.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    host: String,
    port: u16,
    timeout: Option<Duration>,
    implicit_tls: bool,
}

impl SmtpRelay {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: None,
            implicit_tls: true,
        }
    }

    /// Creates a transport for the server named in `config`.
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            timeout: config.timeout,
            implicit_tls: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Speaks plain SMTP when disabled, for local relays without TLS.
    pub fn with_implicit_tls(mut self, enabled: bool) -> Self {
        self.implicit_tls = enabled;
        self
    }

    async fn connect(&self, credentials: &Credentials) -> ServiceResult<AsyncSmtpConnection> {
        let tls = if self.implicit_tls {
            let parameters = TlsParameters::new(self.host.clone()).map_err(|e| {
                ServiceError::configuration(format!("invalid SMTP host '{}'", self.host))
                    .with_service("smtp")
                    .with_source(e)
            })?;
            Some(parameters)
        } else {
            None
        };

        debug!(host = %self.host, port = self.port, tls = self.implicit_tls, "Opening SMTP session");

        let mut connection = AsyncSmtpConnection::connect_tokio1(
            (self.host.clone(), self.port),
            self.timeout,
            &ClientId::default(),
            tls,
            None,
        )
        .await
        .map_err(|e| {
            ServiceError::network(format!(
                "SMTP connection to {}:{} failed: {}",
                self.host, self.port, e
            ))
            .with_service("smtp")
            .with_source(e)
        })?;

        match connection
            .auth(&[Mechanism::Plain, Mechanism::Login], credentials)
            .await
        {
            Ok(_) => Ok(connection),
            Err(e) if e.is_permanent() => Err(ServiceError::authentication(format!(
                "SMTP login rejected: {}",
                e
            ))
            .with_service("smtp")
            .with_source(e)),
            Err(e) => Err(ServiceError::network(format!("SMTP login failed: {}", e))
                .with_service("smtp")
                .with_source(e)),
        }
    }
}

struct SmtpSession {
    relay: SmtpRelay,
    credentials: Credentials,
    connection: AsyncSmtpConnection,
}

impl MailSession for SmtpSession {
    fn deliver(&mut self, message: Message) -> BoxFuture<'_, ServiceResult<()>> {
        Box::pin(async move {
            // A rejected transaction makes lettre drop the connection.
            if self.connection.has_broken() {
                debug!(host = %self.relay.host, "SMTP connection closed, reconnecting");
                self.connection = self.relay.connect(&self.credentials).await?;
            }

            let response = self
                .connection
                .send(message.envelope(), &message.formatted())
                .await
                .map_err(|e| {
                    ServiceError::delivery(format!("SMTP send failed: {}", e))
                        .with_service("smtp")
                        .with_source(e)
                })?;
            debug!(code = %response.code(), "SMTP server accepted message");
            Ok(())
        })
    }

    fn close(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.connection.has_broken() {
                return;
            }
            if let Err(e) = self.connection.quit().await {
                debug!(error = %e, "SMTP QUIT failed");
            }
        })
    }
}

impl MailTransport for SmtpRelay {
    fn open_session<'a>(
        &'a self,
        credentials: &'a MailCredentials,
    ) -> BoxFuture<'a, ServiceResult<Box<dyn MailSession>>> {
        Box::pin(async move {
            let credentials = Credentials::new(
                credentials.address().to_string(),
                credentials.password().to_string(),
            );
            let connection = self.connect(&credentials).await?;
            Ok(Box::new(SmtpSession {
                relay: self.clone(),
                credentials,
                connection,
            }) as Box<dyn MailSession>)
        })
    }
}
