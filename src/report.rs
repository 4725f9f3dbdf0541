//! Monthly report aggregation.
//!
//! Folds attendance days and leave balances into summaries. The
//! aggregator reads data handed to it and owns no mutable state; export
//! formatting (PDF/Excel) belongs to callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceDay, AttendanceStatus, ClockState, LeaveBalance};

/// A per-employee attendance and leave summary for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The employee summarized.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// Days with any recorded attendance state.
    pub recorded_days: usize,
    /// Days closed with both clock events.
    pub complete_days: usize,
    /// Days left open (clock-in without clock-out).
    pub incomplete_days: usize,
    /// Days counted present (on time).
    pub present_days: usize,
    /// Days counted late.
    pub late_days: usize,
    /// Days counted half days.
    pub half_days: usize,
    /// Days covered by approved leave.
    pub on_leave_days: usize,
    /// Days whose times were corrected by regularization.
    pub regularized_days: usize,
    /// Total worked hours over closed days.
    pub total_worked_hours: Decimal,
    /// Average worked hours per closed day.
    pub average_daily_hours: Decimal,
    /// The employee's leave balances for the year.
    pub balances: Vec<LeaveBalance>,
}

/// Builds monthly summaries from attendance and balance records.
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    /// Creates a new aggregator.
    pub fn new() -> Self {
        ReportAggregator
    }

    /// Summarizes one employee's month.
    ///
    /// `days` must already be filtered to the month being summarized;
    /// `balances` are the employee's balances for the year.
    pub fn monthly_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        days: &[AttendanceDay],
        balances: Vec<LeaveBalance>,
    ) -> MonthlySummary {
        let complete_days = days
            .iter()
            .filter(|d| d.clock_state() == ClockState::Closed)
            .count();
        let incomplete_days = days
            .iter()
            .filter(|d| d.clock_state() == ClockState::Open)
            .count();

        let count_status = |status: AttendanceStatus| days.iter().filter(|d| d.status == status).count();

        let total_worked_hours: Decimal = days.iter().map(|d| d.worked_hours()).sum();
        let average_daily_hours = if complete_days > 0 {
            (total_worked_hours / Decimal::from(complete_days as u64)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        MonthlySummary {
            employee_id: employee_id.to_string(),
            year,
            month,
            recorded_days: days.len(),
            complete_days,
            incomplete_days,
            present_days: count_status(AttendanceStatus::Present),
            late_days: count_status(AttendanceStatus::Late),
            half_days: count_status(AttendanceStatus::HalfDay),
            on_leave_days: count_status(AttendanceStatus::OnLeave),
            regularized_days: count_status(AttendanceStatus::Regularized),
            total_worked_hours: total_worked_hours.round_dp(2),
            average_daily_hours,
            balances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn closed_day(date_str: &str, in_hms: (u32, u32), out_hms: (u32, u32), status: AttendanceStatus) -> AttendanceDay {
        let date = make_date(date_str);
        let mut day = AttendanceDay::new("emp_001", date);
        day.clock_in = Some(date.and_hms_opt(in_hms.0, in_hms.1, 0).unwrap());
        day.clock_out = Some(date.and_hms_opt(out_hms.0, out_hms.1, 0).unwrap());
        day.status = status;
        day
    }

    #[test]
    fn test_empty_month_summary() {
        let summary = ReportAggregator::new().monthly_summary("emp_001", 2026, 3, &[], vec![]);
        assert_eq!(summary.recorded_days, 0);
        assert_eq!(summary.total_worked_hours, Decimal::ZERO);
        assert_eq!(summary.average_daily_hours, Decimal::ZERO);
    }

    #[test]
    fn test_summary_counts_statuses_and_hours() {
        let mut open_day = AttendanceDay::new("emp_001", make_date("2026-03-04"));
        open_day.clock_in = Some(make_date("2026-03-04").and_hms_opt(9, 0, 0).unwrap());
        open_day.status = AttendanceStatus::Present;

        let days = vec![
            closed_day("2026-03-02", (9, 0), (17, 30), AttendanceStatus::Present),
            closed_day("2026-03-03", (9, 30), (17, 30), AttendanceStatus::Late),
            open_day,
        ];

        let summary = ReportAggregator::new().monthly_summary("emp_001", 2026, 3, &days, vec![]);
        assert_eq!(summary.recorded_days, 3);
        assert_eq!(summary.complete_days, 2);
        assert_eq!(summary.incomplete_days, 1);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 1);
        // 8.5 + 8.0 hours over two closed days.
        assert_eq!(summary.total_worked_hours, Decimal::new(165, 1));
        assert_eq!(summary.average_daily_hours, Decimal::new(825, 2));
    }
}
