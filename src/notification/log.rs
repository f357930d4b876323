use async_trait::async_trait;
use tracing::info;

use crate::error::EngineResult;

use super::{Notification, Notifier};

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    /// Creates a notifier that logs mail as coming from `sender`.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> EngineResult<()> {
        info!(
            from = %self.sender,
            to = %notification.recipient,
            subject = %notification.subject,
            body_bytes = notification.body.len(),
            "Notification written to log"
        );
        Ok(())
    }
}
