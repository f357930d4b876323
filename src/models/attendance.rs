//! Attendance models.
//!
//! This module contains the [`AttendanceStatus`] enumeration, the validated
//! [`AttendanceRecord`] handed to the salary engine, and the
//! [`AttendanceDocument`] shape in which stores persist records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The closed set of attendance outcomes for a coach on one day.
///
/// Adding a variant forces every `match` over this type (most importantly
/// the salary tally) to decide how the new status is paid.
///
/// The labels written by earlier front-ends ("Work Full-Day", "Duty-Leave", ...)
/// are accepted as aliases on input.
///
/// # Example
///
/// ```
/// use coach_desk::models::AttendanceStatus;
///
/// let status: AttendanceStatus = "Work Half-Day".parse().unwrap();
/// assert_eq!(status, AttendanceStatus::HalfDay);
/// assert_eq!(status.to_string(), "half_day");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked the whole day.
    #[serde(alias = "Work Full-Day")]
    FullDay,
    /// Worked half of the day.
    #[serde(alias = "Work Half-Day")]
    HalfDay,
    /// Did not work.
    #[serde(alias = "Absent")]
    Absent,
    /// Away on official duty.
    #[serde(alias = "Duty-Leave")]
    DutyLeave,
}

impl AttendanceStatus {
    /// Every status, in declaration order.
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::FullDay,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Absent,
        AttendanceStatus::DutyLeave,
    ];

    /// The canonical label written to storage and JSON.
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::FullDay => "full_day",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::DutyLeave => "duty_leave",
        }
    }

    fn legacy_label(self) -> &'static str {
        match self {
            AttendanceStatus::FullDay => "Work Full-Day",
            AttendanceStatus::HalfDay => "Work Half-Day",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::DutyLeave => "Duty-Leave",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttendanceStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.label() == s || status.legacy_label() == s)
            .ok_or_else(|| {
                EngineError::invalid_input("status", format!("unknown attendance status '{}'", s))
            })
    }
}

/// One coach's attendance on one calendar day.
///
/// # Example
///
/// ```
/// use coach_desk::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let record = AttendanceRecord {
///     id: Uuid::new_v4(),
///     coach_id: "coach_001".to_string(),
///     coach_name: "Mr. Silva".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     status: AttendanceStatus::FullDay,
///     notes: None,
/// };
/// assert_eq!(record.starts_at().to_rfc3339(), "2024-03-01T00:00:00+00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The coach this record belongs to.
    pub coach_id: String,
    /// Display copy of the coach's name at the time of marking.
    pub coach_name: String,
    /// The calendar day, with no time-of-day component.
    pub date: NaiveDate,
    /// What the coach did that day.
    pub status: AttendanceStatus,
    /// Optional free-text note (e.g. "Sick leave").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// The instant the record's day begins, midnight UTC.
    pub fn starts_at(&self) -> DateTime<Utc> {
        day_start_utc(self.date)
    }

    /// Returns true if the record's day starts inside `[start, end)`.
    pub fn falls_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let at = self.starts_at();
        at >= start && at < end
    }
}

/// The fields needed to mark (create or replace) a day's attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceUpsert {
    /// The coach being marked.
    pub coach_id: String,
    /// Display copy of the coach's name.
    pub coach_name: String,
    /// The normalised calendar day.
    pub date: NaiveDate,
    /// The status to record.
    pub status: AttendanceStatus,
    /// Optional note.
    pub notes: Option<String>,
}

/// An attendance record as stored, with its status kept as raw text.
///
/// Stores persist this shape; converting it into an [`AttendanceRecord`]
/// is where corrupt status values are caught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDocument {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The coach this record belongs to.
    pub coach_id: String,
    /// Display copy of the coach's name.
    pub coach_name: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The stored status label.
    pub status: String,
    /// Optional note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AttendanceRecord> for AttendanceDocument {
    fn from(record: AttendanceRecord) -> Self {
        AttendanceDocument {
            id: record.id,
            coach_id: record.coach_id,
            coach_name: record.coach_name,
            date: record.date,
            status: record.status.label().to_string(),
            notes: record.notes,
        }
    }
}

impl TryFrom<AttendanceDocument> for AttendanceRecord {
    type Error = EngineError;

    fn try_from(doc: AttendanceDocument) -> Result<Self, Self::Error> {
        let status = doc.status.parse::<AttendanceStatus>().map_err(|_| {
            EngineError::DataIntegrityViolation {
                record_id: doc.id.to_string(),
                message: format!("unknown attendance status '{}'", doc.status),
            }
        })?;

        Ok(AttendanceRecord {
            id: doc.id,
            coach_id: doc.coach_id,
            coach_name: doc.coach_name,
            date: doc.date,
            status,
            notes: doc.notes,
        })
    }
}

/// Midnight UTC at the start of `date`.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Normalises a submitted attendance date to a calendar day.
///
/// Accepts a plain `YYYY-MM-DD` date, or an RFC 3339 timestamp whose
/// time-of-day is dropped after converting it to UTC.
///
/// # Example
///
/// ```
/// use coach_desk::models::parse_attendance_date;
/// use chrono::NaiveDate;
///
/// // 02:00 in Colombo is still the previous day in UTC.
/// let day = parse_attendance_date("2024-03-01T02:00:00+05:30").unwrap();
/// assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn parse_attendance_date(raw: &str) -> EngineResult<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            EngineError::invalid_input(
                "date",
                format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{}'", raw),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_document(status: &str) -> AttendanceDocument {
        AttendanceDocument {
            id: Uuid::new_v4(),
            coach_id: "coach_001".to_string(),
            coach_name: "Mr. Perera".to_string(),
            date: date(2024, 2, 10),
            status: status.to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::DutyLeave).unwrap(),
            "\"duty_leave\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::FullDay).unwrap(),
            "\"full_day\""
        );
    }

    #[test]
    fn test_status_accepts_legacy_labels() {
        let status: AttendanceStatus = serde_json::from_str("\"Duty-Leave\"").unwrap();
        assert_eq!(status, AttendanceStatus::DutyLeave);
        assert_eq!(
            "Work Full-Day".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::FullDay
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown_label() {
        let result = "Sick".parse::<AttendanceStatus>();
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_status_label_round_trips_through_from_str() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.label().parse::<AttendanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_document_with_known_status_converts() {
        let record = AttendanceRecord::try_from(create_document("Work Half-Day")).unwrap();
        assert_eq!(record.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn test_document_with_unknown_status_is_integrity_violation() {
        let doc = create_document("Overtime");
        let id = doc.id.to_string();
        match AttendanceRecord::try_from(doc) {
            Err(EngineError::DataIntegrityViolation { record_id, message }) => {
                assert_eq!(record_id, id);
                assert!(message.contains("Overtime"));
            }
            other => panic!("Expected DataIntegrityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_falls_within_is_half_open() {
        let start = day_start_utc(date(2024, 2, 1));
        let end = day_start_utc(date(2024, 3, 1));
        let mut record = AttendanceRecord::try_from(create_document("full_day")).unwrap();

        record.date = date(2024, 2, 1);
        assert!(record.falls_within(start, end));
        record.date = date(2024, 2, 29);
        assert!(record.falls_within(start, end));
        record.date = date(2024, 3, 1);
        assert!(!record.falls_within(start, end));
        record.date = date(2024, 1, 31);
        assert!(!record.falls_within(start, end));
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_attendance_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_timestamp_drops_time_of_day() {
        assert_eq!(
            parse_attendance_date("2024-02-29T17:45:00Z").unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_parse_timestamp_with_negative_offset_moves_forward() {
        // 21:00 in New York on 29 February is already 1 March in UTC.
        assert_eq!(
            parse_attendance_date("2024-02-29T21:00:00-05:00").unwrap(),
            date(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_attendance_date("29/02/2024"),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
