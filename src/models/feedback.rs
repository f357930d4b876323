//! Player feedback models.
//!
//! Feedback is written by a coach about a player; creating it notifies the
//! player by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A stored feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The player the feedback is about.
    pub player_id: String,
    /// The player's display name.
    pub player_name: String,
    /// The coach giving the feedback.
    pub coach_id: String,
    /// The coach's display name.
    pub coach_name: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Where the notification was sent.
    #[serde(default)]
    pub player_email: Option<String>,
    /// When the entry was created.
    pub date: DateTime<Utc>,
}

/// Validated input for a new feedback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    /// The player the feedback is about.
    pub player_id: String,
    /// The player's display name.
    pub player_name: String,
    /// The coach giving the feedback.
    pub coach_id: String,
    /// The coach's display name.
    pub coach_name: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Optional comment.
    pub comment: Option<String>,
    /// The player's email address.
    pub player_email: String,
}

impl NewFeedback {
    /// Stamps the input with an ID and creation time.
    pub fn into_feedback(self, date: DateTime<Utc>) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            player_id: self.player_id,
            player_name: self.player_name,
            coach_id: self.coach_id,
            coach_name: self.coach_name,
            rating: self.rating,
            comment: self.comment,
            player_email: Some(self.player_email),
            date,
        }
    }
}

/// A partial update to a feedback entry. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPatch {
    /// New player ID.
    #[serde(default)]
    pub player_id: Option<String>,
    /// New player name.
    #[serde(default)]
    pub player_name: Option<String>,
    /// New coach ID.
    #[serde(default)]
    pub coach_id: Option<String>,
    /// New coach name.
    #[serde(default)]
    pub coach_name: Option<String>,
    /// New rating.
    #[serde(default)]
    pub rating: Option<i64>,
    /// New comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// New player email.
    #[serde(default)]
    pub player_email: Option<String>,
}

impl FeedbackPatch {
    /// Applies the patch to `feedback`, validating every supplied field
    /// before anything is changed.
    pub fn apply(self, feedback: &mut Feedback) -> EngineResult<()> {
        let rating = self.rating.map(validate_rating).transpose()?;
        for (field, value) in [
            ("player_id", &self.player_id),
            ("player_name", &self.player_name),
            ("coach_id", &self.coach_id),
            ("coach_name", &self.coach_name),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(email) = &self.player_email {
            validate_email(email)?;
        }

        if let Some(player_id) = self.player_id {
            feedback.player_id = player_id;
        }
        if let Some(player_name) = self.player_name {
            feedback.player_name = player_name;
        }
        if let Some(coach_id) = self.coach_id {
            feedback.coach_id = coach_id;
        }
        if let Some(coach_name) = self.coach_name {
            feedback.coach_name = coach_name;
        }
        if let Some(rating) = rating {
            feedback.rating = rating;
        }
        if let Some(comment) = self.comment {
            feedback.comment = Some(comment);
        }
        if let Some(email) = self.player_email {
            feedback.player_email = Some(email);
        }
        Ok(())
    }
}

/// A player who can receive feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier for the player.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address notifications go to.
    pub email: String,
}

/// Checks that a rating lies in `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: i64) -> EngineResult<u8> {
    if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(EngineError::invalid_input(
            "rating",
            format!(
                "must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            ),
        ))
    }
}

/// Rejects blank text fields.
pub fn require_text(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        Err(EngineError::invalid_input(field, "is required"))
    } else {
        Ok(())
    }
}

/// A light sanity check on an email address: something on both sides of one `@`.
pub fn validate_email(email: &str) -> EngineResult<()> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(EngineError::invalid_input(
            "player_email",
            format!("'{}' is not an email address", email),
        )),
    }
}
