//! Mail delivery configuration.

use std::fmt;
use std::time::Duration;

/// SMTP login. The address doubles as the sender of every reminder.
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    address: String,
    password: String,
}

impl MailCredentials {
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: password.into(),
        }
    }

    /// Builds credentials only when both parts are present and non-empty.
    pub fn from_parts(address: Option<String>, password: Option<String>) -> Option<Self> {
        match (address, password) {
            (Some(address), Some(password))
                if !address.trim().is_empty() && !password.is_empty() =>
            {
                Some(Self::new(address.trim(), password))
            }
            _ => None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for the email notifier.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server reached over implicit TLS.
    pub smtp_host: String,

    pub smtp_port: u16,

    /// Login; `None` disables sending.
    pub credentials: Option<MailCredentials>,

    /// Per-command SMTP timeout. `None` keeps the transport's default.
    pub timeout: Option<Duration>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: Self::DEFAULT_SMTP_HOST.to_string(),
            smtp_port: Self::DEFAULT_SMTP_PORT,
            credentials: None,
            timeout: None,
        }
    }
}

impl MailConfig {
    pub const DEFAULT_SMTP_HOST: &'static str = "smtp.gmail.com";

    /// SMTPS (implicit TLS) port.
    pub const DEFAULT_SMTP_PORT: u16 = 465;

    pub fn new(credentials: Option<MailCredentials>) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.smtp_host = host.into();
        self.smtp_port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true if credentials are configured.
    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }
}
