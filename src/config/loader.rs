//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Coach, Player, validate_email};

use super::types::{
    AppConfig, LoggingConfig, NotificationConfig, NotifierKind, RosterConfig, ServerConfig,
    ServiceConfig,
};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── app.yaml     # Server, logging and notification settings
/// └── roster.yaml  # Seed coaches and players
/// ```
///
/// # Example
///
/// ```no_run
/// use coach_desk::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on port {}", loader.server().port);
/// for coach in loader.coaches() {
///     println!("{}: {}", coach.name, coach.basic_salary);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a required field is missing
    ///   (`ConfigParseError`)
    /// - The roster is inconsistent: duplicate coach IDs, a negative salary,
    ///   a malformed player email, or an `http` notifier without an endpoint
    ///   (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let app_path = path.join("app.yaml");
        let app = Self::load_yaml::<AppConfig>(&app_path)?;
        Self::validate_notification(&app.notification, &app_path.display().to_string())?;

        let roster_path = path.join("roster.yaml");
        let roster = Self::load_yaml::<RosterConfig>(&roster_path)?;
        Self::validate_roster(&roster, &roster_path.display().to_string())?;

        Ok(Self {
            config: ServiceConfig::new(app, roster),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_notification(notification: &NotificationConfig, path: &str) -> EngineResult<()> {
        if notification.kind == NotifierKind::Http && notification.endpoint.is_none() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "notification.endpoint is required when notification.kind is http"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn validate_roster(roster: &RosterConfig, path: &str) -> EngineResult<()> {
        let parse_error = |message: String| EngineError::ConfigParseError {
            path: path.to_string(),
            message,
        };

        let mut seen = HashSet::new();
        for coach in &roster.coaches {
            coach
                .validate()
                .map_err(|e| parse_error(format!("coach '{}': {}", coach.id, e)))?;
            if !seen.insert(coach.id.as_str()) {
                return Err(parse_error(format!("duplicate coach id '{}'", coach.id)));
            }
        }
        for player in &roster.players {
            validate_email(&player.email)
                .map_err(|e| parse_error(format!("player '{}': {}", player.id, e)))?;
        }
        Ok(())
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the HTTP listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.app().server
    }

    /// Returns the log settings.
    pub fn logging(&self) -> &LoggingConfig {
        &self.config.app().logging
    }

    /// Returns the notification settings.
    pub fn notification(&self) -> &NotificationConfig {
        &self.config.app().notification
    }

    /// Returns the seed coaches, in file order.
    pub fn coaches(&self) -> &[Coach] {
        &self.config.roster().coaches
    }

    /// Returns the configured players.
    pub fn players(&self) -> &[Player] {
        &self.config.roster().players
    }
}
