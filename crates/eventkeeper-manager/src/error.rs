//! Manager error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors returned by event manager and event store operations.
///
/// Per-field update problems and per-recipient delivery problems are not
/// errors; they are reported in `UpdateReport` and `DeliveryReport`.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// No event with this id.
    #[error("Event not found: {id}")]
    NotFound { id: String },

    /// An event with this id already exists.
    #[error("Event already exists: {id}")]
    AlreadyExists { id: String },

    /// The store file exists but could not be read.
    #[error("Failed to read event store {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file does not contain a valid event document.
    #[error("Event store {} is corrupt: {source}", .path.display())]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the store failed; the previous contents are intact.
    #[error("Failed to write event store {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ManagerError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    pub fn storage_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageRead {
            path: path.into(),
            source,
        }
    }

    pub fn storage_corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::StorageCorrupt {
            path: path.into(),
            source,
        }
    }

    pub fn storage_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns true for [`ManagerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for persistence failures.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageRead { .. } | Self::StorageCorrupt { .. } | Self::StorageWrite { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_id() {
        assert_eq!(ManagerError::not_found("42").to_string(), "Event not found: 42");
        assert_eq!(
            ManagerError::already_exists("1").to_string(),
            "Event already exists: 1"
        );
    }

    #[test]
    fn storage_errors_name_the_path() {
        let err = ManagerError::storage_write("/data/events.json", io::Error::other("disk full"));
        assert!(err.is_storage());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Failed to write event store /data/events.json: disk full"
        );
    }

    #[test]
    fn classification() {
        assert!(ManagerError::not_found("x").is_not_found());
        let corrupt = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ManagerError::storage_corrupt("e.json", corrupt).is_storage());
    }
}
