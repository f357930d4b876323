//! Request types for the Coach Desk API.
//!
//! This module defines the JSON request structures and their conversion
//! into validated domain inputs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceUpsert, NewFeedback, parse_attendance_date, require_text, validate_email,
    validate_rating,
};

/// Request body for `POST /api/salaries/calculate`.
///
/// The fields are kept as raw JSON so that a missing or non-integer value is
/// reported as an invalid period rather than a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// The report year.
    #[serde(default)]
    pub year: Option<Value>,
    /// The report month (1-12).
    #[serde(default)]
    pub month: Option<Value>,
}

/// Request body for `POST /api/attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// The coach being marked.
    pub coach_id: String,
    /// The coach's display name.
    pub coach_name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    /// Attendance status label.
    pub status: String,
    /// Optional note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<MarkAttendanceRequest> for AttendanceUpsert {
    type Error = EngineError;

    fn try_from(req: MarkAttendanceRequest) -> EngineResult<Self> {
        require_text("coach_id", &req.coach_id)?;
        require_text("coach_name", &req.coach_name)?;
        let date = parse_attendance_date(&req.date)?;
        let status = req.status.trim().parse()?;

        Ok(AttendanceUpsert {
            coach_id: req.coach_id.trim().to_string(),
            coach_name: req.coach_name.trim().to_string(),
            date,
            status,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Request body for `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedbackRequest {
    /// The player the feedback is about.
    pub player_id: String,
    /// The player's display name.
    pub player_name: String,
    /// The coach giving the feedback.
    pub coach_id: String,
    /// The coach's display name.
    pub coach_name: String,
    /// Rating from 1 to 5.
    pub rating: i64,
    /// Optional comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Where to send the notification.
    pub player_email: String,
}

impl TryFrom<CreateFeedbackRequest> for NewFeedback {
    type Error = EngineError;

    fn try_from(req: CreateFeedbackRequest) -> EngineResult<Self> {
        require_text("player_id", &req.player_id)?;
        require_text("player_name", &req.player_name)?;
        require_text("coach_id", &req.coach_id)?;
        require_text("coach_name", &req.coach_name)?;
        let rating = validate_rating(req.rating)?;
        validate_email(&req.player_email)?;

        Ok(NewFeedback {
            player_id: req.player_id,
            player_name: req.player_name,
            coach_id: req.coach_id,
            coach_name: req.coach_name,
            rating,
            comment: req.comment,
            player_email: req.player_email.trim().to_string(),
        })
    }
}
