//! Error types for external service calls.
//!
//! Weather lookups and mail delivery both fail with [`ServiceError`]; the
//! [`ServiceErrorCode`] says what kind of failure it was so callers can decide
//! whether a later retry makes sense. Nothing in this crate retries on its own.

use std::fmt;
use thiserror::Error;

/// The category of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorCode {
    /// Missing or invalid configuration (API key, credentials, sender).
    ConfigurationError,
    /// Connection failed, timed out, or DNS resolution failed.
    NetworkError,
    /// The server answered with a non-success HTTP status.
    HttpStatus,
    /// The response body did not have the expected shape.
    InvalidResponse,
    /// The mail server rejected the credentials.
    AuthenticationFailed,
    /// A recipient address could not be parsed.
    InvalidAddress,
    /// The mail server refused or failed to accept a message.
    DeliveryFailed,
}

impl ServiceErrorCode {
    /// Returns true if the same call could succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::HttpStatus | Self::DeliveryFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::AuthenticationFailed => "authentication_failed",
            Self::InvalidAddress => "invalid_address",
            Self::DeliveryFailed => "delivery_failed",
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error from the weather service or the mail transport.
#[derive(Debug, Error)]
pub struct ServiceError {
    code: ServiceErrorCode,
    message: String,
    /// Which service produced the error ("weather", "smtp").
    service: Option<&'static str>,
    /// HTTP status, when the failure was a non-success response.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ServiceError {
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            service: None,
            status: None,
            source: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::ConfigurationError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::NetworkError, message)
    }

    /// Creates an error for a non-success HTTP response.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ServiceErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InvalidResponse, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::AuthenticationFailed, message)
    }

    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InvalidAddress, message)
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::DeliveryFailed, message)
    }

    /// Tags the error with the service that produced it.
    pub fn with_service(mut self, service: &'static str) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ServiceErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn service(&self) -> Option<&'static str> {
        self.service
    }

    /// Returns the HTTP status for [`ServiceErrorCode::HttpStatus`] errors.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(service) = self.service {
            write!(f, "[{}] ", service)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
