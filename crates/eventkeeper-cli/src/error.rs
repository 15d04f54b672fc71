//! CLI error types.

use std::fmt;

use eventkeeper_manager::ManagerError;
use eventkeeper_providers::ServiceError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum CliError {
    /// Event manager or store error.
    Manager(ManagerError),
    /// Weather or mail service error.
    Service(ServiceError),
    /// Output could not be written.
    Io(std::io::Error),
    /// Output could not be serialized.
    Json(serde_json::Error),
    /// Some requested change was not applied.
    Rejected(String),
}

impl CliError {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Manager(ManagerError::NotFound { .. }) => 2,
            Self::Manager(ManagerError::AlreadyExists { .. }) => 3,
            Self::Manager(_) => 4,
            Self::Service(_) => 5,
            Self::Rejected(_) => 6,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager(err) => write!(f, "{}", err),
            Self::Service(err) => write!(f, "service error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Json(err) => write!(f, "JSON error: {}", err),
            Self::Rejected(msg) => write!(f, "not applied: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Manager(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<ManagerError> for CliError {
    fn from(err: ManagerError) -> Self {
        Self::Manager(err)
    }
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
