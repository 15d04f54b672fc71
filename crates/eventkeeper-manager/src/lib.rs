//! Event management: persistence, CRUD, attendee lists and reminders.
//!
//! ```text
//!  caller ──▶ EventManager ──▶ EventStore (JsonFileStore | MemoryStore)
//!                  │
//!                  ├──▶ ForecastProvider   (optional)
//!                  └──▶ ReminderNotifier   (optional)
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod reminder;
pub mod store;
pub mod update;

pub use config::{DEFAULT_STORE_FILE, ManagerConfig};
pub use error::{ManagerError, ManagerResult};
pub use manager::{EventDetails, EventManager};
pub use reminder::{DueReminder, due_reminders, reminder_message};
pub use store::{EventMap, EventStore, JsonFileStore, MemoryStore};
pub use update::{FieldRejection, RejectionReason, UpdateReport};
