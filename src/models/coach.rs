//! Coach model.
//!
//! This module defines the [`Coach`] struct, the payroll identity every
//! salary line is computed for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a coach on the payroll.
///
/// Coaches are maintained by an admin workflow and are read-only to the
/// salary calculator.
///
/// # Example
///
/// ```
/// use coach_desk::models::Coach;
/// use rust_decimal::Decimal;
///
/// let coach = Coach {
///     id: "6543b5e43a6d71f654f5d1b1".to_string(),
///     name: "Mr. Perera".to_string(),
///     basic_salary: Decimal::new(100000, 0),
/// };
/// assert!(coach.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    /// Opaque unique identifier for the coach.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Basic monthly salary; never negative.
    pub basic_salary: Decimal,
}

impl Coach {
    /// Checks the coach invariants: a non-empty ID and name, and a
    /// non-negative basic salary.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::invalid_input("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_input("name", "must not be empty"));
        }
        if self.basic_salary.is_sign_negative() && !self.basic_salary.is_zero() {
            return Err(EngineError::invalid_input(
                "basic_salary",
                format!("must not be negative, got {}", self.basic_salary),
            ));
        }
        Ok(())
    }
}

/// The `{id, name}` view of a coach used to populate selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachSummary {
    /// The coach ID.
    pub id: String,
    /// The coach's display name.
    pub name: String,
}

impl From<&Coach> for CoachSummary {
    fn from(coach: &Coach) -> Self {
        CoachSummary {
            id: coach.id.clone(),
            name: coach.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_coach(basic_salary: Decimal) -> Coach {
        Coach {
            id: "coach_001".to_string(),
            name: "Ms. Kumari".to_string(),
            basic_salary,
        }
    }

    #[test]
    fn test_deserialize_coach_with_string_salary() {
        let json = r#"{
            "id": "coach_001",
            "name": "Ms. Kumari",
            "basic_salary": "95000"
        }"#;

        let coach: Coach = serde_json::from_str(json).unwrap();
        assert_eq!(coach.name, "Ms. Kumari");
        assert_eq!(coach.basic_salary, Decimal::new(95000, 0));
    }

    #[test]
    fn test_zero_salary_is_valid() {
        assert!(create_test_coach(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let result = create_test_coach(Decimal::new(-1, 0)).validate();
        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "basic_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut coach = create_test_coach(Decimal::ONE);
        coach.name = "   ".to_string();
        assert!(coach.validate().is_err());
    }

    #[test]
    fn test_summary_from_coach() {
        let coach = create_test_coach(Decimal::ONE);
        let summary = CoachSummary::from(&coach);
        assert_eq!(summary.id, "coach_001");
        assert_eq!(summary.name, "Ms. Kumari");
    }
}
