//! Manager configuration.

use std::path::PathBuf;

use eventkeeper_core::ReminderWindow;

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "events.json";

/// Event manager configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Path of the JSON event document.
    pub store_path: PathBuf,

    /// Window used by `check_reminders_now` when none is given.
    pub reminder_window: ReminderWindow,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            reminder_window: ReminderWindow::default(),
        }
    }
}

impl ManagerConfig {
    /// Creates a configuration storing events at `store_path`.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Default::default()
        }
    }

    /// Builder: set the reminder lookahead in hours.
    pub fn with_reminder_hours(mut self, hours: u32) -> Self {
        self.reminder_window = ReminderWindow::from_hours(hours);
        self
    }

    /// Builder: set the reminder window.
    pub fn with_reminder_window(mut self, window: ReminderWindow) -> Self {
        self.reminder_window = window;
        self
    }
}
