//! Error types for Coach Desk.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the salary engine, the stores and the notifier can report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for Coach Desk.
///
/// All operations return this error type, so the HTTP layer can map every
/// failure to a response in one place.
///
/// # Example
///
/// ```
/// use coach_desk::error::EngineError;
///
/// let error = EngineError::InvalidPeriod {
///     field: "month".to_string(),
///     message: "must be between 1 and 12, got 13".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid period field 'month': must be between 1 and 12, got 13"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested salary period was missing, non-integer or out of range.
    #[error("Invalid period field '{field}': {message}")]
    InvalidPeriod {
        /// The period field that was rejected ("year" or "month").
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The coach store holds no coaches, so there is nothing to report.
    #[error("No coaches were found")]
    NoCoachesFound,

    /// A store collaborator could not be reached or failed to answer.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the transport or connectivity failure.
        message: String,
    },

    /// A persisted record carries data outside the closed model.
    #[error("Data integrity violation in record '{record_id}': {message}")]
    DataIntegrityViolation {
        /// The ID of the corrupt record.
        record_id: String,
        /// A description of the violation.
        message: String,
    },

    /// A second attendance record was written for the same coach and day.
    #[error("Duplicate attendance record for coach '{coach_id}' on {date}")]
    DuplicateRecord {
        /// The coach the record belongs to.
        coach_id: String,
        /// The calendar day already taken.
        date: NaiveDate,
    },

    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity ("Attendance record", "Feedback").
        entity: String,
        /// The ID that was looked up.
        id: String,
    },

    /// A request field was missing or invalid.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A notification could not be delivered.
    #[error("Notification to '{recipient}' failed: {message}")]
    NotificationFailed {
        /// The address the notification was meant for.
        recipient: String,
        /// A description of the delivery failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidPeriod`].
    pub fn invalid_period(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidPeriod {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/app.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/app.yaml"
        );
    }

    #[test]
    fn test_invalid_period_displays_field_and_message() {
        let error = EngineError::invalid_period("year", "is required");
        assert_eq!(
            error.to_string(),
            "Invalid period field 'year': is required"
        );
    }

    #[test]
    fn test_no_coaches_found_display() {
        assert_eq!(EngineError::NoCoachesFound.to_string(), "No coaches were found");
    }

    #[test]
    fn test_duplicate_record_displays_coach_and_date() {
        let error = EngineError::DuplicateRecord {
            coach_id: "coach_1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate attendance record for coach 'coach_1' on 2024-02-29"
        );
    }

    #[test]
    fn test_data_integrity_violation_displays_record() {
        let error = EngineError::DataIntegrityViolation {
            record_id: "rec_9".to_string(),
            message: "unknown attendance status 'Sick'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Data integrity violation in record 'rec_9': unknown attendance status 'Sick'"
        );
    }

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::NotFound {
            entity: "Feedback".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Feedback not found: abc");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_unavailable() -> EngineResult<()> {
            Err(EngineError::StoreUnavailable {
                message: "connection reset".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_unavailable()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::StoreUnavailable { .. })
        ));
    }
}
