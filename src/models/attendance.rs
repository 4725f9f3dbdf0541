//! Attendance day model and derived states.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The clock-event state of an [`AttendanceDay`].
///
/// Derived from the stored timestamps, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// No clock event recorded yet.
    NoEvent,
    /// A clock-in was recorded and no clock-out has closed it.
    Open,
    /// Both clock-in and clock-out are recorded.
    Closed,
}

/// The derived status of an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// No shift obligation was met and no leave covers the day.
    Absent,
    /// Clocked in within the grace window and worked a full day.
    Present,
    /// Clocked in after the grace window expired.
    Late,
    /// Worked duration fell below the half-day threshold.
    HalfDay,
    /// The day is covered by an approved leave request.
    OnLeave,
    /// The recorded times were superseded by an approved regularization.
    Regularized,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::HalfDay => write!(f, "half_day"),
            AttendanceStatus::OnLeave => write!(f, "on_leave"),
            AttendanceStatus::Regularized => write!(f, "regularized"),
        }
    }
}

/// The authoritative attendance record for one (employee, date).
///
/// Holds at most one open clock-in and at most one clock-out. Created
/// lazily on the first clock event of the day; never deleted, only
/// superseded by later events and recomputed status.
///
/// Invariant: `clock_out`, if present, is strictly after `clock_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The recorded clock-in timestamp, if any.
    pub clock_in: Option<NaiveDateTime>,
    /// The recorded clock-out timestamp, if any.
    pub clock_out: Option<NaiveDateTime>,
    /// Set when an approved regularization superseded the recorded times.
    pub regularized: bool,
    /// Set when an approved leave request covers this date.
    pub on_leave: bool,
    /// The derived status, recomputed on every mutation.
    pub status: AttendanceStatus,
}

impl AttendanceDay {
    /// Creates an empty record for the given employee and date.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        AttendanceDay {
            employee_id: employee_id.into(),
            date,
            clock_in: None,
            clock_out: None,
            regularized: false,
            on_leave: false,
            status: AttendanceStatus::Absent,
        }
    }

    /// The clock-event state derived from the stored timestamps.
    pub fn clock_state(&self) -> ClockState {
        match (self.clock_in, self.clock_out) {
            (None, _) => ClockState::NoEvent,
            (Some(_), None) => ClockState::Open,
            (Some(_), Some(_)) => ClockState::Closed,
        }
    }

    /// Worked duration in hours, as an exact decimal.
    ///
    /// Returns zero while the day is not closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::AttendanceDay;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    /// let mut day = AttendanceDay::new("emp_001", date);
    /// day.clock_in = Some(date.and_hms_opt(9, 0, 0).unwrap());
    /// day.clock_out = Some(date.and_hms_opt(17, 30, 0).unwrap());
    /// assert_eq!(day.worked_hours(), Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        match (self.clock_in, self.clock_out) {
            (Some(clock_in), Some(clock_out)) => {
                let minutes = (clock_out - clock_in).num_minutes();
                Decimal::new(minutes, 0) / Decimal::new(60, 0)
            }
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_day_has_no_event() {
        let day = AttendanceDay::new("emp_001", make_date("2026-03-02"));
        assert_eq!(day.clock_state(), ClockState::NoEvent);
        assert_eq!(day.status, AttendanceStatus::Absent);
        assert_eq!(day.worked_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_open_day_after_clock_in() {
        let date = make_date("2026-03-02");
        let mut day = AttendanceDay::new("emp_001", date);
        day.clock_in = Some(date.and_hms_opt(9, 5, 0).unwrap());
        assert_eq!(day.clock_state(), ClockState::Open);
        assert_eq!(day.worked_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_closed_day_worked_hours() {
        let date = make_date("2026-03-02");
        let mut day = AttendanceDay::new("emp_001", date);
        day.clock_in = Some(date.and_hms_opt(9, 0, 0).unwrap());
        day.clock_out = Some(date.and_hms_opt(13, 15, 0).unwrap());
        assert_eq!(day.clock_state(), ClockState::Closed);
        assert_eq!(day.worked_hours(), Decimal::new(425, 2)); // 4.25
    }

    #[test]
    fn test_overnight_worked_hours() {
        let date = make_date("2026-03-02");
        let mut day = AttendanceDay::new("emp_001", date);
        day.clock_in = Some(date.and_hms_opt(22, 0, 0).unwrap());
        day.clock_out = Some(make_date("2026-03-03").and_hms_opt(6, 0, 0).unwrap());
        assert_eq!(day.worked_hours(), Decimal::new(80, 1)); // 8.0
    }

    #[test]
    fn test_status_serialization_is_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).unwrap();
        assert_eq!(json, "\"half_day\"");
        let json = serde_json::to_string(&AttendanceStatus::OnLeave).unwrap();
        assert_eq!(json, "\"on_leave\"");
    }
}
