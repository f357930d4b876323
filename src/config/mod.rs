//! Configuration loading and management for Coach Desk.
//!
//! This module loads the service settings and the seed roster from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use coach_desk::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Seeding {} coaches", config.coaches().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, LoggingConfig, NotificationConfig, NotifierKind, RosterConfig, ServerConfig,
    ServiceConfig,
};
