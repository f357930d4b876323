//! Salary report models.
//!
//! A [`SalaryReportLine`] is derived fresh on every calculation and is never
//! persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One coach's salary for one month.
///
/// # Example
///
/// ```
/// use coach_desk::models::SalaryReportLine;
/// use rust_decimal::Decimal;
///
/// let line = SalaryReportLine {
///     coach_id: "coach_001".to_string(),
///     coach_name: "Mr. Perera".to_string(),
///     basic_salary: Decimal::new(100000, 0),
///     year: 2024,
///     month: 4,
///     full_days: 20,
///     half_days: 4,
///     net_salary: Decimal::new(7333333, 2),
/// };
/// assert_eq!(line.net_salary.to_string(), "73333.33");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReportLine {
    /// The coach the line is for.
    pub coach_id: String,
    /// The coach's display name.
    pub coach_name: String,
    /// The coach's basic monthly salary.
    pub basic_salary: Decimal,
    /// The report year.
    pub year: i32,
    /// The report month (1-12).
    pub month: u32,
    /// Number of full-day records in the month.
    pub full_days: u32,
    /// Number of half-day records in the month.
    pub half_days: u32,
    /// Pro-rated pay, always carried to two decimal places.
    pub net_salary: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_salary_line_uses_decimal_strings() {
        let line = SalaryReportLine {
            coach_id: "coach_003".to_string(),
            coach_name: "Mr. Silva".to_string(),
            basic_salary: Decimal::new(110000, 0),
            year: 2023,
            month: 2,
            full_days: 0,
            half_days: 0,
            net_salary: Decimal::new(0, 2),
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"basic_salary\":\"110000\""));
        assert!(json.contains("\"net_salary\":\"0.00\""));
        assert!(json.contains("\"month\":2"));
    }
}
