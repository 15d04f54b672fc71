//! Event persistence.
//!
//! The store is a plain snapshot store: `load` returns the whole mapping and
//! `save` replaces it. [`JsonFileStore`] writes the document to a uniquely
//! named sibling temporary file and renames it over the target, so readers
//! only ever see a complete document. Concurrent writers from different
//! processes are not coordinated; the last `save` wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use eventkeeper_core::{EventId, EventRecord};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ManagerError, ManagerResult};

/// All events keyed by id, iterated in ascending id order.
pub type EventMap = BTreeMap<EventId, EventRecord>;

/// Durable mapping from event id to event record.
pub trait EventStore: Send + Sync {
    /// Returns the persisted events, or an empty map if nothing was saved yet.
    fn load(&self) -> ManagerResult<EventMap>;

    /// Replaces the persisted events with `events`.
    fn save(&self, events: &EventMap) -> ManagerResult<()>;
}

impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    fn load(&self) -> ManagerResult<EventMap> {
        (**self).load()
    }

    fn save(&self, events: &EventMap) -> ManagerResult<()> {
        (**self).save(events)
    }
}

/// Serializes events into the on-disk document format.
pub fn to_document(events: &EventMap) -> serde_json::Result<String> {
    let mut document = serde_json::to_string_pretty(events)?;
    document.push('\n');
    Ok(document)
}

/// Events stored as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, content: &str) -> std::io::Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        // Dropped, and so removed, on any error before persist succeeds.
        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> ManagerResult<EventMap> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No event store yet, starting empty");
            return Ok(EventMap::new());
        }

        let content = fs::read(&self.path)
            .map_err(|e| ManagerError::storage_read(&self.path, e))?;
        let events: EventMap = serde_json::from_slice(&content)
            .map_err(|e| ManagerError::storage_corrupt(&self.path, e))?;

        debug!(path = ?self.path, count = events.len(), "Loaded events");
        Ok(events)
    }

    fn save(&self, events: &EventMap) -> ManagerResult<()> {
        let document = to_document(events)
            .map_err(|e| ManagerError::storage_write(&self.path, std::io::Error::other(e)))?;
        self.write_atomically(&document)
            .map_err(|e| ManagerError::storage_write(&self.path, e))?;
        debug!(path = ?self.path, count = events.len(), "Saved events");
        Ok(())
    }
}

/// Events kept in memory only. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<EventMap>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `events`.
    pub fn with_events(events: EventMap) -> Self {
        Self {
            events: Mutex::new(events),
            saves: Mutex::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the last saved snapshot.
    pub fn snapshot(&self) -> EventMap {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> ManagerResult<EventMap> {
        Ok(self.snapshot())
    }

    fn save(&self, events: &EventMap) -> ManagerResult<()> {
        *self.events.lock().unwrap_or_else(PoisonError::into_inner) = events.clone();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
