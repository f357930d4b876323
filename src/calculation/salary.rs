//! Monthly salary calculation.
//!
//! Each coach's salary is pro-rated from the days they worked:
//!
//! ```text
//! salary_per_day = basic_salary / days_in_month   (0 when either is 0)
//! attended       = full_days + 0.5 * half_days
//! net_salary     = round_2dp(salary_per_day * attended)
//! ```
//!
//! `Absent` and `DutyLeave` days add nothing to `attended`.

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, Coach, SalaryReportLine};
use crate::store::{AttendanceStore, CoachStore};

use super::SalaryPeriod;

/// Decimal places net salaries are rounded to.
pub const NET_SALARY_SCALE: u32 = 2;

/// Full-day and half-day counts for one coach in one period.
///
/// # Example
///
/// ```
/// use coach_desk::calculation::AttendanceTally;
/// use rust_decimal::Decimal;
///
/// let tally = AttendanceTally { full_days: 20, half_days: 4 };
/// assert_eq!(tally.attended_days_value(), Decimal::new(22, 0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceTally {
    /// Number of `FullDay` records.
    pub full_days: u32,
    /// Number of `HalfDay` records.
    pub half_days: u32,
}

impl AttendanceTally {
    /// Counts the statuses of `records`.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.record(record.status);
        }
        tally
    }

    /// Adds one day with the given status.
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::FullDay => self.full_days += 1,
            AttendanceStatus::HalfDay => self.half_days += 1,
            // Duty leave is not counted; see DESIGN.md.
            AttendanceStatus::Absent | AttendanceStatus::DutyLeave => {}
        }
    }

    /// Worked days, with a half day counting 0.5.
    pub fn attended_days_value(&self) -> Decimal {
        Decimal::from(self.full_days) + Decimal::from(self.half_days) * Decimal::new(5, 1)
    }
}

/// The pay for one day: `basic_salary / days_in_month`, or zero when
/// either is not positive.
pub fn salary_per_day(basic_salary: Decimal, days_in_month: u32) -> Decimal {
    if basic_salary > Decimal::ZERO && days_in_month > 0 {
        basic_salary / Decimal::from(days_in_month)
    } else {
        Decimal::ZERO
    }
}

/// Computes the net salary, rounded once to two decimal places with
/// midpoints rounded away from zero.
///
/// The result always carries exactly two decimal places, so `0` renders as
/// `"0.00"`.
///
/// # Example
///
/// ```
/// use coach_desk::calculation::{AttendanceTally, calculate_net_salary};
/// use rust_decimal::Decimal;
///
/// let tally = AttendanceTally { full_days: 20, half_days: 4 };
/// let net = calculate_net_salary(Decimal::new(100000, 0), 30, tally);
/// assert_eq!(net.to_string(), "73333.33");
/// ```
pub fn calculate_net_salary(
    basic_salary: Decimal,
    days_in_month: u32,
    tally: AttendanceTally,
) -> Decimal {
    let gross = salary_per_day(basic_salary, days_in_month) * tally.attended_days_value();
    let mut net =
        gross.round_dp_with_strategy(NET_SALARY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    net.rescale(NET_SALARY_SCALE);
    net
}

/// Builds one coach's report line from the records found for the period.
///
/// Only records whose day falls inside the period are counted.
pub fn build_salary_line(
    coach: &Coach,
    period: &SalaryPeriod,
    records: &[AttendanceRecord],
) -> SalaryReportLine {
    let tally = AttendanceTally::from_records(
        records
            .iter()
            .filter(|r| r.falls_within(period.start(), period.end())),
    );
    let net_salary = calculate_net_salary(coach.basic_salary, period.days_in_month(), tally);

    SalaryReportLine {
        coach_id: coach.id.clone(),
        coach_name: coach.name.clone(),
        basic_salary: coach.basic_salary,
        year: period.year(),
        month: period.month(),
        full_days: tally.full_days,
        half_days: tally.half_days,
        net_salary,
    }
}

/// Produces the monthly salary report from the coach and attendance stores.
///
/// The calculator is read-only: it never writes to either store.
#[derive(Clone)]
pub struct SalaryCalculator {
    coaches: Arc<dyn CoachStore>,
    attendance: Arc<dyn AttendanceStore>,
}

impl SalaryCalculator {
    /// Creates a calculator over the given stores.
    pub fn new(coaches: Arc<dyn CoachStore>, attendance: Arc<dyn AttendanceStore>) -> Self {
        Self {
            coaches,
            attendance,
        }
    }

    /// Calculates one salary line per coach for `month` of `year`.
    ///
    /// # Errors
    ///
    /// - `InvalidPeriod` if the month is outside 1-12 or the year is out of range
    /// - `NoCoachesFound` if the coach store is empty
    /// - any store error, unchanged; one failed lookup fails the whole report
    pub async fn calculate(&self, year: i32, month: u32) -> EngineResult<Vec<SalaryReportLine>> {
        let period = SalaryPeriod::new(year, month)?;
        self.calculate_period(&period).await
    }

    /// Calculates the report for an already validated period.
    ///
    /// Attendance lookups run concurrently, one per coach, and are joined
    /// before the report is assembled in coach-store order.
    pub async fn calculate_period(
        &self,
        period: &SalaryPeriod,
    ) -> EngineResult<Vec<SalaryReportLine>> {
        let started = Instant::now();

        let coaches = self.coaches.list_all().await?;
        if coaches.is_empty() {
            return Err(EngineError::NoCoachesFound);
        }

        let lines = try_join_all(coaches.iter().map(|coach| self.coach_line(coach, period))).await?;

        info!(
            year = period.year(),
            month = period.month(),
            coach_count = lines.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Salary report calculated"
        );
        Ok(lines)
    }

    async fn coach_line(
        &self,
        coach: &Coach,
        period: &SalaryPeriod,
    ) -> EngineResult<SalaryReportLine> {
        let records = self
            .attendance
            .find_in_range(&coach.id, period.start(), period.end())
            .await?;
        let line = build_salary_line(coach, period, &records);
        debug!(
            coach_id = %line.coach_id,
            full_days = line.full_days,
            half_days = line.half_days,
            net_salary = %line.net_salary,
            "Coach salary computed"
        );
        Ok(line)
    }
}
