//! Salary period arithmetic.
//!
//! A salary period is one calendar month, bounded by the half-open UTC
//! interval `[first day 00:00, first day of next month 00:00)`.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::day_start_utc;

/// Earliest year a period may fall in.
pub const MIN_YEAR: i32 = 1;
/// Latest year a period may fall in.
pub const MAX_YEAR: i32 = 9999;

/// A validated (year, month) with its UTC bounds.
///
/// # Example
///
/// ```
/// use coach_desk::calculation::SalaryPeriod;
///
/// let period = SalaryPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.days_in_month(), 29);
/// assert_eq!(period.start().to_rfc3339(), "2024-02-01T00:00:00+00:00");
/// assert_eq!(period.end().to_rfc3339(), "2024-03-01T00:00:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPeriod {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    next_first_day: NaiveDate,
}

impl SalaryPeriod {
    /// Builds the period for `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if the month is outside 1-12 or the year is
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::invalid_period(
                "year",
                format!("must be between {} and {}, got {}", MIN_YEAR, MAX_YEAR, year),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_period(
                "month",
                format!("must be between 1 and 12, got {}", month),
            ));
        }

        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let first_day = first_of_month(year, month)?;
        let next_first_day = first_of_month(next_year, next_month)?;

        Ok(Self {
            year,
            month,
            first_day,
            next_first_day,
        })
    }

    /// Builds a period from raw JSON values, as received from a client.
    ///
    /// Both values must be present JSON integers; anything else is an
    /// `InvalidPeriod`.
    ///
    /// # Example
    ///
    /// ```
    /// use coach_desk::calculation::SalaryPeriod;
    /// use serde_json::json;
    ///
    /// assert!(SalaryPeriod::from_json(Some(&json!(2024)), Some(&json!(6))).is_ok());
    /// assert!(SalaryPeriod::from_json(Some(&json!(2024)), None).is_err());
    /// assert!(SalaryPeriod::from_json(Some(&json!(2024)), Some(&json!(6.5))).is_err());
    /// ```
    pub fn from_json(year: Option<&Value>, month: Option<&Value>) -> EngineResult<Self> {
        let year = integer_field("year", year)?;
        let month = integer_field("month", month)?;

        let year = i32::try_from(year).map_err(|_| {
            EngineError::invalid_period("year", format!("out of range: {}", year))
        })?;
        let month = u32::try_from(month).map_err(|_| {
            EngineError::invalid_period("month", format!("must be between 1 and 12, got {}", month))
        })?;

        Self::new(year, month)
    }

    /// The period's year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The period's month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Inclusive start: the first day of the month at midnight UTC.
    pub fn start(&self) -> DateTime<Utc> {
        day_start_utc(self.first_day)
    }

    /// Exclusive end: the first day of the next month at midnight UTC.
    pub fn end(&self) -> DateTime<Utc> {
        day_start_utc(self.next_first_day)
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        (self.next_first_day - self.first_day).num_days() as u32
    }
}

/// Gregorian leap-year rule: divisible by 4, except centuries not
/// divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
///
/// # Example
///
/// ```
/// use coach_desk::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert_eq!(days_in_month(2023, 4).unwrap(), 30);
/// assert!(days_in_month(2023, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    SalaryPeriod::new(year, month).map(|p| p.days_in_month())
}

fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::invalid_period("year", format!("{}-{:02} is not a valid month", year, month))
    })
}

fn integer_field(field: &str, value: Option<&Value>) -> EngineResult<i64> {
    match value {
        None | Some(Value::Null) => Err(EngineError::invalid_period(field, "is required")),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
            EngineError::invalid_period(field, format!("must be an integer, got {}", n))
        }),
        Some(other) => Err(EngineError::invalid_period(
            field,
            format!("must be an integer, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn assert_invalid_field(result: EngineResult<SalaryPeriod>, expected_field: &str) {
        match result {
            Err(EngineError::InvalidPeriod { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidPeriod on {}, got {:?}", expected_field, other),
        }
    }

    #[test]
    fn test_days_in_month_for_every_month_of_2023() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, index as u32 + 1).unwrap(), *days);
        }
    }

    #[test]
    fn test_february_leap_years() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let period = SalaryPeriod::new(2024, 12).unwrap();
        assert_eq!(period.days_in_month(), 31);
        assert_eq!(period.end().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_month_zero_and_thirteen_are_invalid() {
        assert_invalid_field(SalaryPeriod::new(2024, 0), "month");
        assert_invalid_field(SalaryPeriod::new(2024, 13), "month");
    }

    #[test]
    fn test_year_out_of_range_is_invalid() {
        assert_invalid_field(SalaryPeriod::new(0, 5), "year");
        assert_invalid_field(SalaryPeriod::new(10_000, 5), "year");
    }

    #[test]
    fn test_from_json_missing_fields() {
        assert_invalid_field(SalaryPeriod::from_json(None, Some(&json!(3))), "year");
        assert_invalid_field(SalaryPeriod::from_json(Some(&json!(2024)), None), "month");
        assert_invalid_field(
            SalaryPeriod::from_json(Some(&Value::Null), Some(&json!(3))),
            "year",
        );
    }

    #[test]
    fn test_from_json_non_integer_fields() {
        assert_invalid_field(
            SalaryPeriod::from_json(Some(&json!("2024")), Some(&json!(3))),
            "year",
        );
        assert_invalid_field(
            SalaryPeriod::from_json(Some(&json!(2024)), Some(&json!(3.5))),
            "month",
        );
        assert_invalid_field(
            SalaryPeriod::from_json(Some(&json!(2024)), Some(&json!(-1))),
            "month",
        );
    }

    #[test]
    fn test_from_json_valid() {
        let period = SalaryPeriod::from_json(Some(&json!(2024)), Some(&json!(4))).unwrap();
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 4);
        assert_eq!(period.days_in_month(), 30);
    }

    proptest! {
        #[test]
        fn prop_days_in_month_follows_gregorian_rule(year in MIN_YEAR..=MAX_YEAR, month in 1u32..=12) {
            let expected = match month {
                2 if is_leap_year(year) => 29,
                2 => 28,
                4 | 6 | 9 | 11 => 30,
                _ => 31,
            };
            prop_assert_eq!(days_in_month(year, month).unwrap(), expected);
        }

        #[test]
        fn prop_period_bounds_are_midnight_utc(year in MIN_YEAR..MAX_YEAR, month in 1u32..=12) {
            let period = SalaryPeriod::new(year, month).unwrap();
            prop_assert!(period.start() < period.end());
            prop_assert_eq!(
                (period.end() - period.start()).num_days(),
                i64::from(period.days_in_month())
            );
        }
    }
}
