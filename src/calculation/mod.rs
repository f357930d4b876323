//! Calculation logic for Coach Desk.
//!
//! This module contains the salary period arithmetic (half-open UTC month
//! bounds, Gregorian day counts) and the monthly salary engine that turns
//! attendance into pro-rated pay.

mod period;
mod salary;

pub use period::{MAX_YEAR, MIN_YEAR, SalaryPeriod, days_in_month, is_leap_year};
pub use salary::{
    AttendanceTally, NET_SALARY_SCALE, SalaryCalculator, build_salary_line, calculate_net_salary,
    salary_per_day,
};
