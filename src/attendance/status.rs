//! Pure attendance status derivation.
//!
//! Status is always recomputed from the stored timestamps, the resolved
//! shift window, and the leave overlay. It is never stored in a way that
//! can drift from the timestamps.

use crate::config::AttendanceThresholds;
use crate::models::{AttendanceDay, AttendanceStatus, ShiftWindow};

/// Derives the status of an attendance day.
///
/// Precedence:
/// 1. An approved leave overlay makes the day `OnLeave`.
/// 2. A day with no clock-in is `Absent`.
/// 3. A day whose times were superseded by an approved regularization is
///    `Regularized`.
/// 4. Otherwise punctuality and worked duration decide: a closed day
///    below the half-day threshold is `HalfDay`; a clock-in after the
///    grace window is `Late`; everything else is `Present`.
///
/// # Examples
///
/// ```
/// use attendance_engine::attendance::derive_status;
/// use attendance_engine::config::AttendanceThresholds;
/// use attendance_engine::models::{AttendanceDay, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let thresholds = AttendanceThresholds {
///     full_day_hours: Decimal::new(8, 0),
///     half_day_hours: Decimal::new(4, 0),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let day = AttendanceDay::new("emp_001", date);
/// assert_eq!(derive_status(&day, None, &thresholds), AttendanceStatus::Absent);
/// ```
pub fn derive_status(
    day: &AttendanceDay,
    window: Option<&ShiftWindow>,
    thresholds: &AttendanceThresholds,
) -> AttendanceStatus {
    if day.on_leave {
        return AttendanceStatus::OnLeave;
    }

    let Some(clock_in) = day.clock_in else {
        return AttendanceStatus::Absent;
    };

    if day.regularized {
        return AttendanceStatus::Regularized;
    }

    if day.clock_out.is_some() && day.worked_hours() < thresholds.half_day_hours {
        return AttendanceStatus::HalfDay;
    }

    let late = window.is_some_and(|w| clock_in > w.latest_on_time());
    if late {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
