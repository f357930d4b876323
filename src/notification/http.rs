//! Mail relay notifier.
//!
//! Posts each notification as JSON to an HTTP mail relay:
//!
//! ```text
//! POST {endpoint}
//! {"from": "...", "to": "...", "subject": "...", "html": "..."}
//! ```
//!
//! Any transport error or non-2xx status is a `NotificationFailed`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::{Notification, Notifier};

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends notifications through an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
}

impl HttpNotifier {
    /// Creates a relay notifier with a per-request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::ConfigParseError {
                path: "notification".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            sender: sender.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, notification: &Notification) -> EngineResult<()> {
        let failed = |message: String| EngineError::NotificationFailed {
            recipient: notification.recipient.clone(),
            message,
        };

        let message = RelayMessage {
            from: &self.sender,
            to: &notification.recipient,
            subject: &notification.subject,
            html: &notification.body,
        };

        self.client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| failed(e.to_string()))?;

        info!(to = %notification.recipient, "Notification sent to mail relay");
        Ok(())
    }
}
