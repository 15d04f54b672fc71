//! Runtime configuration assembled from flags and environment.
//!
//! Every setting comes from the command line, with the environment as the
//! fallback (`EVENTS_FILE`, `WEATHER_API_KEY`, `EMAIL_ADDRESS`,
//! `EMAIL_PASSWORD`). There is no configuration file.

use std::path::PathBuf;
use std::sync::Arc;

use eventkeeper_manager::{EventManager, ManagerConfig};
use eventkeeper_providers::mail::{EmailNotifier, MailConfig, MailCredentials};
use eventkeeper_providers::weather::{WeatherClient, WeatherConfig};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::error::CliResult;

/// Settings needed to build an [`EventManager`] and its collaborators.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Path of the JSON event store.
    pub events_file: PathBuf,

    /// weatherapi.com key, if any.
    pub weather_api_key: Option<String>,

    /// Sender credentials; `None` disables reminder emails.
    pub mail_credentials: Option<MailCredentials>,
}

impl CliConfig {
    /// Extracts the settings from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            events_file: cli.events_file.clone(),
            weather_api_key: cli.weather_api_key.clone(),
            mail_credentials: MailCredentials::from_parts(
                cli.email_address.clone(),
                cli.email_password.clone(),
            ),
        }
    }

    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig::new(&self.events_file)
    }

    pub fn weather_config(&self) -> WeatherConfig {
        WeatherConfig::new(self.weather_api_key.clone())
    }

    pub fn mail_config(&self) -> MailConfig {
        MailConfig::new(self.mail_credentials.clone())
    }

    /// Opens the event store and attaches the weather and mail services.
    pub fn build_manager(&self) -> CliResult<EventManager> {
        let mut manager = EventManager::open(self.manager_config())?;

        let weather_config = self.weather_config();
        if weather_config.has_api_key() {
            match WeatherClient::new(weather_config) {
                Ok(client) => manager = manager.with_weather(Arc::new(client)),
                Err(e) => warn!(error = %e, "Weather client unavailable"),
            }
        } else {
            debug!("WEATHER_API_KEY not set, forecasts disabled");
        }

        let mail_config = self.mail_config();
        if !mail_config.is_enabled() {
            debug!("EMAIL_ADDRESS/EMAIL_PASSWORD not set, reminder emails disabled");
        }
        manager = manager.with_notifier(Arc::new(EmailNotifier::new(mail_config)));

        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn flags_fill_settings() {
        let cli = Cli::try_parse_from([
            "eventkeeper",
            "--events-file",
            "e.json",
            "--weather-api-key",
            "key",
            "--email-address",
            "events@x.com",
            "--email-password",
            "pw",
            "list",
        ])
        .unwrap();
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.events_file, PathBuf::from("e.json"));
        assert_eq!(config.weather_api_key.as_deref(), Some("key"));
        assert!(config.mail_config().is_enabled());
    }

    #[test]
    fn mail_disabled_without_credentials() {
        let config = CliConfig::default();
        assert!(!config.mail_config().is_enabled());
        assert!(!config.weather_config().has_api_key());
    }

    #[test]
    fn configs_follow_settings() {
        let config = CliConfig {
            events_file: PathBuf::from("/data/events.json"),
            weather_api_key: Some("key".into()),
            mail_credentials: None,
        };
        assert_eq!(config.manager_config().store_path, PathBuf::from("/data/events.json"));
        assert!(config.weather_config().has_api_key());
    }

    #[test]
    fn build_manager_opens_store() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig {
            events_file: dir.path().join("events.json"),
            ..Default::default()
        };
        let manager = config.build_manager().unwrap();
        assert!(manager.is_empty());
    }
}
