//! The event manager.
//!
//! [`EventManager`] owns the in-memory copy of all events and the store that
//! persists them. Every mutation builds the next state, saves it, and only
//! then replaces the in-memory copy, so a failed save leaves the manager
//! exactly as it was before the call.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use eventkeeper_core::{EventId, EventRecord, EventView, FieldValue, ReminderWindow, local_now};
use eventkeeper_providers::{DeliveryReport, Forecast, ForecastProvider, ReminderNotifier};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ManagerConfig;
use crate::error::{ManagerError, ManagerResult};
use crate::reminder::{DueReminder, due_reminders};
use crate::store::{EventMap, EventStore, JsonFileStore, MemoryStore};
use crate::update::{UpdateReport, apply_field, resolve_field};

/// An event view enriched with the forecast for its location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: EventView,
    /// Absent when no weather provider is configured or the lookup failed.
    pub forecast: Option<Forecast>,
}

/// Creates, reads, updates and deletes events, and sends reminders.
pub struct EventManager {
    store: Box<dyn EventStore>,
    events: EventMap,
    weather: Option<Arc<dyn ForecastProvider>>,
    notifier: Option<Arc<dyn ReminderNotifier>>,
    reminder_window: ReminderWindow,
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("events", &self.events.len())
            .field("weather", &self.weather.as_ref().map(|w| w.name().to_string()))
            .field("notifier", &self.notifier.as_ref().map(|n| n.name().to_string()))
            .field("reminder_window", &self.reminder_window)
            .finish()
    }
}

impl EventManager {
    /// Opens the JSON store named in `config` and loads its events.
    pub fn open(config: ManagerConfig) -> ManagerResult<Self> {
        let store = JsonFileStore::new(&config.store_path);
        let manager = Self::with_store(store)?.with_reminder_window(config.reminder_window);
        info!(
            path = ?config.store_path,
            events = manager.len(),
            "Event store opened"
        );
        Ok(manager)
    }

    /// Loads events from `store`.
    pub fn with_store(store: impl EventStore + 'static) -> ManagerResult<Self> {
        let events = store.load()?;
        Ok(Self {
            store: Box::new(store),
            events,
            weather: None,
            notifier: None,
            reminder_window: ReminderWindow::default(),
        })
    }

    /// Creates a manager whose events live only in memory.
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            events: EventMap::new(),
            weather: None,
            notifier: None,
            reminder_window: ReminderWindow::default(),
        }
    }

    /// Builder: attach a forecast provider.
    pub fn with_weather(mut self, weather: Arc<dyn ForecastProvider>) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Builder: attach a reminder notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn ReminderNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Builder: set the default reminder window.
    pub fn with_reminder_window(mut self, window: ReminderWindow) -> Self {
        self.reminder_window = window;
        self
    }

    /// Returns the default reminder window.
    pub fn reminder_window(&self) -> ReminderWindow {
        self.reminder_window
    }

    /// Replaces the in-memory events with the store's current contents.
    ///
    /// Picks up changes written by other processes. On failure the current
    /// events are kept.
    pub fn reload(&mut self) -> ManagerResult<()> {
        self.events = self.store.load()?;
        debug!(events = self.events.len(), "Events reloaded");
        Ok(())
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates all events in ascending id order.
    pub fn events(&self) -> impl Iterator<Item = (&EventId, &EventRecord)> {
        self.events.iter()
    }

    /// Returns the stored record for `id`.
    pub fn event(&self, id: &str) -> Option<&EventRecord> {
        self.events.get(id)
    }

    fn record(&self, id: &str) -> ManagerResult<&EventRecord> {
        self.events.get(id).ok_or_else(|| ManagerError::not_found(id))
    }

    /// Saves `next` and makes it the current state.
    fn commit(&mut self, next: EventMap) -> ManagerResult<()> {
        self.store.save(&next)?;
        self.events = next;
        Ok(())
    }

    /// Creates an event with no attendees.
    pub fn create_event(
        &mut self,
        id: impl Into<EventId>,
        name: impl Into<String>,
        location: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> ManagerResult<()> {
        let id = id.into();
        if self.events.contains_key(&id) {
            warn!(id = %id, "Event already exists, not creating");
            return Err(ManagerError::already_exists(id.as_str()));
        }

        let record = EventRecord::new(name, location, start_time, end_time);
        let mut next = self.events.clone();
        next.insert(id.clone(), record);
        self.commit(next)?;

        info!(id = %id, "Event created");
        Ok(())
    }

    /// Returns a display view of the event.
    pub fn read_event(&self, id: &str) -> ManagerResult<EventView> {
        let record = self.record(id)?;
        Ok(record.view(&EventId::from(id)))
    }

    /// Overwrites the supplied fields of an event.
    ///
    /// Each field is handled on its own: unknown names, the read-only
    /// `attendees` field and values that cannot be converted are reported in
    /// the returned [`UpdateReport`] while the remaining fields still apply.
    /// The store is saved after every applied field. A save failure aborts
    /// the call; fields applied before it stay persisted.
    pub fn update_event<I, K>(&mut self, id: &str, updates: I) -> ManagerResult<UpdateReport>
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: AsRef<str>,
    {
        self.record(id)?;

        let mut report = UpdateReport::default();
        for (name, value) in updates {
            let name = name.as_ref();
            let field = match resolve_field(name) {
                Ok(field) => field,
                Err(reason) => {
                    warn!(id = %id, field = %name, reason = %reason, "Field rejected");
                    report.reject(name, reason);
                    continue;
                }
            };

            let mut next = self.events.clone();
            let Some(record) = next.get_mut(id) else {
                return Err(ManagerError::not_found(id));
            };
            if let Err(reason) = apply_field(record, field, &value) {
                warn!(id = %id, field = %field, reason = %reason, "Field rejected");
                report.reject(name, reason);
                continue;
            }

            self.commit(next)?;
            debug!(id = %id, field = %field, "Field updated");
            report.applied.push(field);
        }

        info!(
            id = %id,
            applied = report.applied.len(),
            rejected = report.rejected.len(),
            "Event updated"
        );
        Ok(report)
    }

    /// Removes an event.
    pub fn delete_event(&mut self, id: &str) -> ManagerResult<()> {
        self.record(id)?;

        let mut next = self.events.clone();
        next.remove(id);
        self.commit(next)?;

        info!(id = %id, "Event deleted");
        Ok(())
    }

    /// Appends an attendee. Duplicates are kept.
    pub fn add_attendee(&mut self, id: &str, attendee: impl Into<String>) -> ManagerResult<()> {
        self.record(id)?;

        let attendee = attendee.into();
        let mut next = self.events.clone();
        let Some(record) = next.get_mut(id) else {
            return Err(ManagerError::not_found(id));
        };
        record.attendees.push(attendee.clone());
        self.commit(next)?;

        info!(id = %id, attendee = %attendee, "Attendee added");
        Ok(())
    }

    /// Returns the attendees of an event in the order they were added.
    pub fn list_attendees(&self, id: &str) -> ManagerResult<&[String]> {
        Ok(&self.record(id)?.attendees)
    }

    /// Looks up the forecast for the event's location.
    ///
    /// Returns `Ok(None)` when no provider is configured or the lookup fails.
    pub async fn event_forecast(&self, id: &str) -> ManagerResult<Option<Forecast>> {
        let record = self.record(id)?;
        Ok(self.forecast_for(&record.location).await)
    }

    /// Returns the event view together with its location's forecast.
    pub async fn read_event_with_forecast(&self, id: &str) -> ManagerResult<EventDetails> {
        let record = self.record(id)?;
        let event = record.view(&EventId::from(id));
        let forecast = self.forecast_for(&record.location).await;
        Ok(EventDetails { event, forecast })
    }

    async fn forecast_for(&self, location: &str) -> Option<Forecast> {
        let Some(weather) = self.weather.as_ref() else {
            debug!(location = %location, "No weather provider configured");
            return None;
        };

        match weather.get_forecast(location).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                warn!(
                    provider = %weather.name(),
                    location = %location,
                    error = %e,
                    "Forecast unavailable"
                );
                None
            }
        }
    }

    /// Returns the events due for a reminder at `now` without sending anything.
    pub fn due_reminders(&self, now: NaiveDateTime, window: ReminderWindow) -> Vec<DueReminder> {
        due_reminders(&self.events, now, window)
    }

    /// Sends a reminder for every event starting within `window` of `now`.
    ///
    /// Returns one reminder message per due event, in ascending id order.
    /// Each due event triggers exactly one notifier call with its full
    /// attendee list. Delivery problems are logged, never returned.
    pub async fn check_reminders(&self, now: NaiveDateTime, window: ReminderWindow) -> Vec<String> {
        let due = self.due_reminders(now, window);
        debug!(
            now = %now,
            lookahead_mins = window.lookahead().num_minutes(),
            due = due.len(),
            "Checked reminders"
        );

        let mut messages = Vec::with_capacity(due.len());
        for reminder in due {
            info!(id = %reminder.id, "{}", reminder.message);

            if let Some(notifier) = self.notifier.as_ref() {
                let report = notifier
                    .send_reminder(&reminder.event_name, reminder.start_time, &reminder.attendees)
                    .await;
                log_delivery(notifier.name(), &reminder.id, &report);
            }

            messages.push(reminder.message);
        }
        messages
    }

    /// Same as [`check_reminders`](Self::check_reminders) using the local clock.
    pub async fn check_reminders_now(&self, window: ReminderWindow) -> Vec<String> {
        self.check_reminders(local_now(), window).await
    }
}

fn log_delivery(notifier: &str, id: &EventId, report: &DeliveryReport) {
    if report.disabled {
        debug!(notifier = %notifier, id = %id, "Reminder delivery disabled");
    } else if let Some(ref e) = report.session_error {
        warn!(notifier = %notifier, id = %id, error = %e, "Reminder delivery failed");
    } else if report.failures.is_empty() {
        info!(
            notifier = %notifier,
            id = %id,
            delivered = report.delivered.len(),
            "Reminder delivered"
        );
    } else {
        warn!(
            notifier = %notifier,
            id = %id,
            delivered = report.delivered.len(),
            failed = report.failures.len(),
            "Reminder partially delivered"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, NaiveDate};
    use eventkeeper_core::EventField;
    use eventkeeper_providers::{BoxFuture, ServiceError, ServiceResult};
    use tempfile::TempDir;

    use super::*;
    use crate::update::RejectionReason;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 10)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<(String, NaiveDateTime, Vec<String>)>>,
        reject: Vec<&'static str>,
    }

    impl ReminderNotifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        fn send_reminder<'a>(
            &'a self,
            event_name: &'a str,
            start_time: NaiveDateTime,
            recipients: &'a [String],
        ) -> BoxFuture<'a, DeliveryReport> {
            Box::pin(async move {
                self.calls.lock().unwrap().push((
                    event_name.to_string(),
                    start_time,
                    recipients.to_vec(),
                ));
                let mut report = DeliveryReport::default();
                for recipient in recipients {
                    if self.reject.contains(&recipient.as_str()) {
                        report.record_failure(recipient.clone(), ServiceError::delivery("rejected"));
                    } else {
                        report.record_delivered(recipient.clone());
                    }
                }
                report
            })
        }
    }

    struct FixedWeather(Option<Forecast>);

    impl ForecastProvider for FixedWeather {
        fn name(&self) -> &str {
            "fixed"
        }

        fn get_forecast<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ServiceResult<Forecast>> {
            Box::pin(async move {
                self.0
                    .clone()
                    .ok_or_else(|| ServiceError::http_status(400, format!("no data for {}", location)))
            })
        }
    }

    struct BrokenStore;

    impl EventStore for BrokenStore {
        fn load(&self) -> ManagerResult<EventMap> {
            Ok(EventMap::new())
        }

        fn save(&self, _events: &EventMap) -> ManagerResult<()> {
            Err(ManagerError::storage_write(
                "broken.json",
                std::io::Error::other("read-only file system"),
            ))
        }
    }

    fn sunny() -> Forecast {
        Forecast {
            condition: "Sunny".to_string(),
            max_temp: 26.0,
            min_temp: 18.5,
            chance_of_rain: 5,
        }
    }

    fn manager_with_conference() -> EventManager {
        let mut manager = EventManager::in_memory();
        manager
            .create_event("1", "Tech Conference", "New York", ts(9), ts(17))
            .unwrap();
        manager
    }

    #[test]
    fn create_then_read() {
        let manager = manager_with_conference();
        let view = manager.read_event("1").unwrap();
        assert_eq!(view.name, "Tech Conference");
        assert_eq!(view.location, "New York");
        assert_eq!(view.start_time, "2024-09-10 09:00:00");
        assert_eq!(view.end_time, "2024-09-10 17:00:00");
        assert!(view.attendees.is_empty());
    }

    #[test]
    fn integer_ids_are_strings() {
        let mut manager = EventManager::in_memory();
        manager.create_event(7u64, "Standup", "Room 1", ts(9), ts(10)).unwrap();
        assert_eq!(manager.read_event("7").unwrap().id.as_str(), "7");
    }

    #[test]
    fn duplicate_create_keeps_first() {
        let mut manager = manager_with_conference();
        let err = manager
            .create_event("1", "Other", "Berlin", ts(10), ts(11))
            .unwrap_err();
        assert!(matches!(err, ManagerError::AlreadyExists { ref id } if id == "1"));
        assert_eq!(manager.read_event("1").unwrap().name, "Tech Conference");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn missing_events_are_not_found() {
        let mut manager = EventManager::in_memory();
        assert!(manager.read_event("9").unwrap_err().is_not_found());
        assert!(manager.delete_event("9").unwrap_err().is_not_found());
        assert!(manager.add_attendee("9", "a@x.com").unwrap_err().is_not_found());
        assert!(manager.list_attendees("9").unwrap_err().is_not_found());
        assert!(
            manager
                .update_event("9", [("name", FieldValue::from("x"))])
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn update_applies_known_fields() {
        let mut manager = manager_with_conference();
        let report = manager
            .update_event(
                "1",
                [
                    ("location", FieldValue::from("Boston")),
                    ("start_time", FieldValue::from("2024-09-10T10:30:00")),
                    ("end_time", FieldValue::from(ts(18))),
                ],
            )
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(
            report.applied,
            vec![EventField::Location, EventField::StartTime, EventField::EndTime]
        );
        let view = manager.read_event("1").unwrap();
        assert_eq!(view.location, "Boston");
        assert_eq!(view.start_time, "2024-09-10 10:30:00");
        assert_eq!(view.end_time, "2024-09-10 18:00:00");
    }

    #[test]
    fn update_with_unknown_field_changes_nothing() {
        let mut manager = manager_with_conference();
        let before = manager.event("1").cloned();

        let report = manager
            .update_event("1", [("venue", FieldValue::from("Boston"))])
            .unwrap();

        assert!(report.applied.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].field, "venue");
        assert_eq!(report.rejected[0].reason, RejectionReason::UnknownField);
        assert_eq!(manager.event("1").cloned(), before);
    }

    #[test]
    fn update_rejects_per_field() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = EventManager::with_store(Arc::clone(&store)).unwrap();
        manager
            .create_event("1", "Tech Conference", "New York", ts(9), ts(17))
            .unwrap();
        manager.add_attendee("1", "a@x.com").unwrap();
        let saves_before = store.save_count();

        let report = manager
            .update_event(
                "1",
                vec![
                    ("attendees".to_string(), FieldValue::from("b@x.com")),
                    ("start_time".to_string(), FieldValue::from("tomorrow")),
                    ("name".to_string(), FieldValue::from("RustConf")),
                ],
            )
            .unwrap();

        assert_eq!(report.applied, vec![EventField::Name]);
        assert_eq!(report.rejected[0].reason, RejectionReason::ReadOnly);
        assert!(matches!(report.rejected[1].reason, RejectionReason::InvalidValue(_)));

        let record = manager.event("1").unwrap();
        assert_eq!(record.name, "RustConf");
        assert_eq!(record.start_time, ts(9));
        assert_eq!(record.attendees, vec!["a@x.com"]);
        assert_eq!(store.save_count(), saves_before + 1);
        assert_eq!(store.snapshot()["1"].name, "RustConf");
    }

    #[test]
    fn attendees_keep_order_and_duplicates() {
        let mut manager = manager_with_conference();
        for attendee in ["b@x.com", "a@x.com", "b@x.com"] {
            manager.add_attendee("1", attendee).unwrap();
        }
        assert_eq!(
            manager.list_attendees("1").unwrap(),
            ["b@x.com", "a@x.com", "b@x.com"]
        );
    }

    #[test]
    fn delete_removes_event() {
        let mut manager = manager_with_conference();
        manager.delete_event("1").unwrap();
        assert!(manager.is_empty());
        assert!(manager.read_event("1").unwrap_err().is_not_found());
    }

    #[test]
    fn failed_save_leaves_state_unchanged() {
        let mut manager = EventManager::with_store(BrokenStore).unwrap();
        let err = manager
            .create_event("1", "Tech Conference", "New York", ts(9), ts(17))
            .unwrap_err();
        assert!(err.is_storage());
        assert!(manager.is_empty());
    }

    #[test]
    fn failed_save_keeps_existing_event() {
        let mut events = EventMap::new();
        events.insert(
            EventId::from("1"),
            EventRecord::new("Tech Conference", "New York", ts(9), ts(17)),
        );
        // Loads fine, refuses every save.
        struct ReadOnly(EventMap);
        impl EventStore for ReadOnly {
            fn load(&self) -> ManagerResult<EventMap> {
                Ok(self.0.clone())
            }
            fn save(&self, events: &EventMap) -> ManagerResult<()> {
                BrokenStore.save(events)
            }
        }

        let mut manager = EventManager::with_store(ReadOnly(events.clone())).unwrap();
        assert!(manager.add_attendee("1", "a@x.com").is_err());
        assert!(manager.delete_event("1").is_err());
        assert!(
            manager
                .update_event("1", [("name", FieldValue::from("x"))])
                .is_err()
        );
        assert_eq!(manager.events().count(), 1);
        assert_eq!(manager.event("1"), events.get("1"));
    }

    #[test]
    fn events_persist_across_managers() {
        let dir = TempDir::new().unwrap();
        let config = ManagerConfig::new(dir.path().join("events.json"));

        let mut manager = EventManager::open(config.clone()).unwrap();
        manager
            .create_event("1", "Tech Conference", "New York", ts(9), ts(17))
            .unwrap();
        manager.add_attendee("1", "a@x.com").unwrap();
        drop(manager);

        let manager = EventManager::open(config).unwrap();
        assert_eq!(manager.list_attendees("1").unwrap(), ["a@x.com"]);
        assert_eq!(manager.read_event("1").unwrap().location, "New York");
    }

    #[test]
    fn reload_sees_external_writes() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = EventManager::with_store(Arc::clone(&store)).unwrap();

        let mut events = EventMap::new();
        events.insert(
            EventId::from("5"),
            EventRecord::new("Offsite", "Lisbon", ts(9), ts(18)),
        );
        store.save(&events).unwrap();
        assert!(manager.is_empty());

        manager.reload().unwrap();
        assert_eq!(manager.read_event("5").unwrap().name, "Offsite");
    }

    #[test]
    fn open_uses_configured_window() {
        let dir = TempDir::new().unwrap();
        let config = ManagerConfig::new(dir.path().join("events.json")).with_reminder_hours(3);
        let manager = EventManager::open(config).unwrap();
        assert_eq!(manager.reminder_window(), ReminderWindow::from_hours(3));
    }

    #[tokio::test]
    async fn end_to_end_reminder() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut manager = EventManager::in_memory().with_notifier(notifier.clone());
        let start = now() + Duration::hours(2);
        manager
            .create_event("1", "Tech Conference", "New York", start, start + Duration::hours(8))
            .unwrap();
        manager.add_attendee("1", "a@x.com").unwrap();
        manager.add_attendee("1", "b@x.com").unwrap();

        let reminders = manager.check_reminders(now(), ReminderWindow::default()).await;

        assert_eq!(reminders.len(), 1);
        assert!(reminders[0].contains("Tech Conference"));
        let calls = notifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Tech Conference");
        assert_eq!(calls[0].1, start);
        assert_eq!(calls[0].2, vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn reminders_are_not_deduplicated() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut manager = EventManager::in_memory().with_notifier(notifier.clone());
        manager
            .create_event("1", "Launch", "Paris", now() + Duration::hours(1), now() + Duration::hours(2))
            .unwrap();

        manager.check_reminders(now(), ReminderWindow::default()).await;
        manager.check_reminders(now(), ReminderWindow::default()).await;
        assert_eq!(notifier.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reminder_window_boundaries() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut manager = EventManager::in_memory().with_notifier(notifier.clone());
        let offsets = [
            ("a", Duration::seconds(1)),
            ("b", Duration::zero()),
            ("c", Duration::hours(24)),
            ("d", Duration::hours(24) + Duration::seconds(1)),
        ];
        for (id, offset) in offsets {
            let start = now() + offset;
            manager
                .create_event(id, format!("event {}", id), "Paris", start, start)
                .unwrap();
        }

        let reminders = manager.check_reminders(now(), ReminderWindow::default()).await;
        assert_eq!(reminders.len(), 2);
        assert!(reminders[0].contains("event a"));
        assert!(reminders[1].contains("event c"));
        assert_eq!(notifier.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delivery_failures_are_not_raised() {
        let notifier = Arc::new(RecordingNotifier {
            reject: vec!["bad@x.com"],
            ..Default::default()
        });
        let mut manager = EventManager::in_memory().with_notifier(notifier.clone());
        manager
            .create_event("1", "Launch", "Paris", now() + Duration::hours(1), now() + Duration::hours(2))
            .unwrap();
        manager.add_attendee("1", "ok@x.com").unwrap();
        manager.add_attendee("1", "bad@x.com").unwrap();

        let reminders = manager.check_reminders(now(), ReminderWindow::default()).await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(notifier.calls.lock().unwrap()[0].2, vec!["ok@x.com", "bad@x.com"]);
    }

    #[tokio::test]
    async fn reminders_without_notifier_still_report() {
        let mut manager = EventManager::in_memory();
        manager
            .create_event("1", "Launch", "Paris", now() + Duration::hours(1), now() + Duration::hours(2))
            .unwrap();
        let reminders = manager.check_reminders(now(), ReminderWindow::from_hours(2)).await;
        assert_eq!(
            reminders,
            vec!["Reminder: The event 'Launch' is starting soon at 2024-09-10 08:00:00."]
        );
        assert_eq!(manager.due_reminders(now(), ReminderWindow::from_hours(2)).len(), 1);
    }

    #[tokio::test]
    async fn forecast_enrichment() {
        let manager = manager_with_conference().with_weather(Arc::new(FixedWeather(Some(sunny()))));

        assert_eq!(manager.event_forecast("1").await.unwrap(), Some(sunny()));
        let details = manager.read_event_with_forecast("1").await.unwrap();
        assert_eq!(details.event.name, "Tech Conference");
        assert_eq!(details.forecast, Some(sunny()));

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["name"], "Tech Conference");
        assert_eq!(value["forecast"]["condition"], "Sunny");
    }

    #[tokio::test]
    async fn forecast_failure_is_absent_not_error() {
        let manager = manager_with_conference().with_weather(Arc::new(FixedWeather(None)));
        assert_eq!(manager.event_forecast("1").await.unwrap(), None);
        assert!(manager.read_event_with_forecast("1").await.unwrap().forecast.is_none());

        let manager = manager_with_conference();
        assert_eq!(manager.event_forecast("1").await.unwrap(), None);
        assert!(manager.event_forecast("2").await.unwrap_err().is_not_found());
    }
}
