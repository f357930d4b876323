//! Core data models for Coach Desk.
//!
//! This module contains all the domain models used throughout the service.

mod attendance;
mod coach;
mod feedback;
mod salary_report;

pub use attendance::{
    AttendanceDocument, AttendanceRecord, AttendanceStatus, AttendanceUpsert, day_start_utc,
    parse_attendance_date,
};
pub use coach::{Coach, CoachSummary};
pub use feedback::{
    Feedback, FeedbackPatch, MAX_RATING, MIN_RATING, NewFeedback, Player, require_text,
    validate_email, validate_rating,
};
pub use salary_report::SalaryReportLine;
