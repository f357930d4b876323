//! Configuration types for Coach Desk.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{Coach, Player};

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which notifier delivers feedback emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierKind {
    /// Write notifications to the log only.
    #[default]
    Log,
    /// POST notifications to a mail relay endpoint.
    Http,
}

/// Notification delivery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// The notifier implementation to use.
    #[serde(default)]
    pub kind: NotifierKind,
    /// The `From` line of outgoing mail.
    pub sender: String,
    /// Mail relay URL; required when `kind` is `http`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout for the relay, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Service settings from `app.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Notification delivery settings.
    pub notification: NotificationConfig,
}

/// Seed data from `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Coaches loaded into the coach store at start-up and on re-seed.
    pub coaches: Vec<Coach>,
    /// Players available as feedback recipients.
    #[serde(default)]
    pub players: Vec<Player>,
}

/// The complete service configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    app: AppConfig,
    roster: RosterConfig,
}

impl ServiceConfig {
    /// Creates a ServiceConfig from its component parts.
    pub fn new(app: AppConfig, roster: RosterConfig) -> Self {
        Self { app, roster }
    }

    /// Returns the service settings.
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Returns the seed roster.
    pub fn roster(&self) -> &RosterConfig {
        &self.roster
    }
}
