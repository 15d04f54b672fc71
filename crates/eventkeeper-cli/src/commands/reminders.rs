//! Reminder commands: one-shot `remind` and the periodic `watch` loop.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use eventkeeper_core::{ReminderWindow, local_now};
use eventkeeper_manager::EventManager;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::Printer;
use crate::error::CliResult;

fn window_for(manager: &EventManager, hours: Option<u32>) -> ReminderWindow {
    hours
        .map(ReminderWindow::from_hours)
        .unwrap_or_else(|| manager.reminder_window())
}

/// Sends reminders for events starting within the window.
///
/// With `dry_run` the due events are printed and nothing is sent.
pub async fn remind(
    manager: &EventManager,
    printer: &mut Printer<'_>,
    hours: Option<u32>,
    dry_run: bool,
) -> CliResult<()> {
    remind_at(manager, printer, local_now(), window_for(manager, hours), dry_run).await
}

async fn remind_at(
    manager: &EventManager,
    printer: &mut Printer<'_>,
    now: NaiveDateTime,
    window: ReminderWindow,
    dry_run: bool,
) -> CliResult<()> {
    if dry_run {
        let due = manager.due_reminders(now, window);
        if printer.is_json() {
            return printer.json(&due);
        }
        if due.is_empty() {
            return printer.line(no_reminders(window));
        }
        for reminder in due {
            printer.line(format!(
                "{} ({} recipients, not sent)",
                reminder.message,
                reminder.attendees.len()
            ))?;
        }
        return Ok(());
    }

    let messages = manager.check_reminders(now, window).await;
    if printer.is_json() {
        return printer.json(&messages);
    }
    if messages.is_empty() {
        return printer.line(no_reminders(window));
    }
    for message in messages {
        printer.line(message)?;
    }
    Ok(())
}

fn no_reminders(window: ReminderWindow) -> String {
    format!(
        "No events starting within {} hours",
        window.lookahead().num_hours()
    )
}

/// Checks for reminders every `interval` until `shutdown` completes.
///
/// The store is re-read before each check so events added by other
/// invocations are picked up. A failed re-read keeps the previous events.
pub async fn watch(
    manager: &mut EventManager,
    printer: &mut Printer<'_>,
    hours: Option<u32>,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> CliResult<()> {
    let window = window_for(manager, hours);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(
        interval_secs = interval.as_secs(),
        lookahead_hours = window.lookahead().num_hours(),
        "Watching for reminders"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = manager.reload() {
                    warn!(error = %e, "Failed to reload events, using previous state");
                }
                let messages = manager.check_reminders(local_now(), window).await;
                debug!(sent = messages.len(), "Reminder check finished");
                for message in messages {
                    printer.line(message)?;
                }
            }
            _ = &mut shutdown => {
                info!("Stopping reminder watch");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use chrono::Duration as ChronoDuration;
    use eventkeeper_providers::{BoxFuture, DeliveryReport, ReminderNotifier};

    use super::*;

    #[derive(Default)]
    struct CountingNotifier {
        events: Mutex<Vec<String>>,
    }

    impl ReminderNotifier for CountingNotifier {
        fn name(&self) -> &str {
            "counting"
        }

        fn send_reminder<'a>(
            &'a self,
            event_name: &'a str,
            _start_time: NaiveDateTime,
            recipients: &'a [String],
        ) -> BoxFuture<'a, DeliveryReport> {
            Box::pin(async move {
                self.events.lock().unwrap().push(event_name.to_string());
                let mut report = DeliveryReport::default();
                for recipient in recipients {
                    report.record_delivered(recipient.clone());
                }
                report
            })
        }
    }

    fn setup(offset: ChronoDuration) -> (EventManager, Arc<CountingNotifier>) {
        let notifier = Arc::new(CountingNotifier::default());
        let mut manager = EventManager::in_memory().with_notifier(notifier.clone());
        let start = local_now() + offset;
        manager
            .create_event("1", "Tech Conference", "New York", start, start + ChronoDuration::hours(8))
            .unwrap();
        manager.add_attendee("1", "a@x.com").unwrap();
        manager.add_attendee("1", "b@x.com").unwrap();
        (manager, notifier)
    }

    #[tokio::test]
    async fn remind_sends_and_prints() {
        let (manager, notifier) = setup(ChronoDuration::hours(2));
        let mut buf = Vec::new();
        remind(&manager, &mut Printer::new(&mut buf, false), None, false)
            .await
            .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Reminder: The event 'Tech Conference' is starting soon at "));
        assert_eq!(*notifier.events.lock().unwrap(), vec!["Tech Conference"]);
    }

    #[tokio::test]
    async fn dry_run_sends_nothing() {
        let (manager, notifier) = setup(ChronoDuration::hours(2));
        let mut buf = Vec::new();
        remind(&manager, &mut Printer::new(&mut buf, false), None, true)
            .await
            .unwrap();

        assert!(String::from_utf8(buf).unwrap().contains("(2 recipients, not sent)"));
        assert!(notifier.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn hours_narrow_the_window() {
        let (manager, notifier) = setup(ChronoDuration::hours(5));
        let mut buf = Vec::new();
        remind(&manager, &mut Printer::new(&mut buf, false), Some(3), false)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "No events starting within 3 hours\n");
        assert!(notifier.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn json_lists_messages() {
        let (manager, _) = setup(ChronoDuration::hours(1));
        let now = local_now();
        let mut buf = Vec::new();
        remind_at(
            &manager,
            &mut Printer::new(&mut buf, true),
            now,
            ReminderWindow::default(),
            true,
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["id"], "1");
        assert_eq!(value[0]["attendees"][1], "b@x.com");
    }

    #[tokio::test(start_paused = true)]
    async fn watch_checks_until_shutdown() {
        let (mut manager, notifier) = setup(ChronoDuration::hours(2));
        let mut buf = Vec::new();
        let shutdown = tokio::time::sleep(Duration::from_secs(150));

        watch(
            &mut manager,
            &mut Printer::new(&mut buf, false),
            None,
            Duration::from_secs(60),
            shutdown,
        )
        .await
        .unwrap();

        // Ticks at 0s, 60s and 120s.
        assert_eq!(notifier.events.lock().unwrap().len(), 3);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 3);
    }
}
