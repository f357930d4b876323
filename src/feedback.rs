//! Player feedback workflow.
//!
//! Creating feedback is a two-step workflow: persist the entry, then email
//! the player. The second step is best-effort. A delivery failure is logged
//! and reported in the [`FeedbackReceipt`], and the stored entry stays.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::error::EngineResult;
use crate::models::{Feedback, NewFeedback};
use crate::notification::{Notification, Notifier};
use crate::store::FeedbackStore;

/// Subject line of the feedback email.
pub const FEEDBACK_SUBJECT: &str = "New Feedback from Your Coach!";

/// What happened to the notification for a new feedback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The notifier accepted the message.
    Sent,
    /// Delivery failed; the feedback is still stored.
    Failed {
        /// Why delivery failed.
        reason: String,
    },
}

/// The outcome of creating feedback.
#[derive(Debug, Clone)]
pub struct FeedbackReceipt {
    /// The stored entry.
    pub feedback: Feedback,
    /// The notification outcome.
    pub notification: NotificationStatus,
}

/// Creates feedback entries and notifies players.
#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStore>,
    notifier: Arc<dyn Notifier>,
}

impl FeedbackService {
    /// Creates a service over the given store and notifier.
    pub fn new(store: Arc<dyn FeedbackStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn FeedbackStore> {
        &self.store
    }

    /// Persists `new` and then emails the player.
    ///
    /// # Errors
    ///
    /// Only a failure to persist is an error. Notification failures are
    /// logged and returned as [`NotificationStatus::Failed`].
    pub async fn create(&self, new: NewFeedback) -> EngineResult<FeedbackReceipt> {
        let feedback = self.store.create(new.into_feedback(Utc::now())).await?;

        let notification = match feedback_email(&feedback) {
            Some(message) => match self.notifier.send(&message).await {
                Ok(()) => {
                    info!(
                        feedback_id = %feedback.id,
                        to = %message.recipient,
                        "Feedback notification sent"
                    );
                    NotificationStatus::Sent
                }
                Err(err) => {
                    error!(
                        feedback_id = %feedback.id,
                        to = %message.recipient,
                        error = %err,
                        "Feedback was saved, but the notification failed"
                    );
                    NotificationStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            },
            None => NotificationStatus::Failed {
                reason: "feedback has no player email".to_string(),
            },
        };

        Ok(FeedbackReceipt {
            feedback,
            notification,
        })
    }
}

/// Builds the email telling a player about new feedback, if the entry has
/// an address to send it to.
pub fn feedback_email(feedback: &Feedback) -> Option<Notification> {
    let recipient = feedback.player_email.clone()?;
    let comment = feedback
        .comment
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "No comment provided.".to_string());

    let body = format!(
        r#"<html>
    <body style="font-family: Arial, sans-serif; line-height: 1.6;">
        <h2 style="color: #333;">Hello {player},</h2>
        <p>You have received new feedback from your coach, <strong>{coach}</strong>.</p>
        <h3 style="border-bottom: 1px solid #eee; padding-bottom: 5px;">Feedback Details:</h3>
        <ul>
            <li><strong>Rating:</strong> {rating} out of 5</li>
            <li><strong>Comment:</strong> {comment}</li>
        </ul>
        <p>Keep up the great work!</p>
    </body>
</html>"#,
        player = escape_html(&feedback.player_name),
        coach = escape_html(&feedback.coach_name),
        rating = feedback.rating,
        comment = comment,
    );

    Some(Notification {
        recipient,
        subject: FEEDBACK_SUBJECT.to_string(),
        body,
    })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
