//! Notification delivery.
//!
//! Notifications are fire-and-forget for the workflows that send them: a
//! failed delivery is reported back as `NotificationFailed` so the caller can
//! log it, but it never undoes work the caller already persisted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{NotificationConfig, NotifierKind};
use crate::error::{EngineError, EngineResult};

mod http;
mod log;

pub use self::http::HttpNotifier;
pub use self::log::LogNotifier;

/// An outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The recipient's address.
    pub recipient: String,
    /// The subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// Delivers notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one notification.
    async fn send(&self, notification: &Notification) -> EngineResult<()>;
}

/// Builds the notifier selected by `config`.
pub fn build_notifier(config: &NotificationConfig) -> EngineResult<Arc<dyn Notifier>> {
    match config.kind {
        NotifierKind::Log => Ok(Arc::new(LogNotifier::new(config.sender.clone()))),
        NotifierKind::Http => {
            let endpoint = config.endpoint.clone().ok_or_else(|| EngineError::ConfigParseError {
                path: "notification.endpoint".to_string(),
                message: "required when notification.kind is http".to_string(),
            })?;
            let notifier = HttpNotifier::new(
                endpoint,
                config.sender.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(notifier))
        }
    }
}
