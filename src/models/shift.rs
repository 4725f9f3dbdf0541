//! Shift template and resolved shift window models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A reusable shift definition assigned to employees.
///
/// Templates are reference data; the [`ShiftResolver`](crate::scheduling::ShiftResolver)
/// turns a template into a dated [`ShiftWindow`] per (employee, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Short code identifying the template (e.g. "general", "night").
    pub code: String,
    /// Expected start time of the shift.
    pub start: NaiveTime,
    /// Expected end time of the shift.
    pub end: NaiveTime,
    /// Minutes after the expected start within which a clock-in still
    /// counts as on time.
    pub grace_minutes: u32,
    /// Weekdays this template applies to.
    pub weekdays: Vec<Weekday>,
}

impl ShiftTemplate {
    /// Returns true if the template applies on the given weekday.
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(&weekday)
    }
}

/// The shift window expected of an employee on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// The date this window applies to.
    pub date: NaiveDate,
    /// Expected start of work.
    pub start: NaiveTime,
    /// Expected end of work. May be on the following calendar day for
    /// overnight shifts (`end < start`).
    pub end: NaiveTime,
    /// Grace period in minutes after `start`.
    pub grace_minutes: u32,
}

impl ShiftWindow {
    /// The latest timestamp at which a clock-in still counts as on time.
    pub fn latest_on_time(&self) -> NaiveDateTime {
        self.date.and_time(self.start) + chrono::Duration::minutes(i64::from(self.grace_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> ShiftWindow {
        ShiftWindow {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            grace_minutes: 10,
        }
    }

    #[test]
    fn test_latest_on_time_includes_grace() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 10, 0)
            .unwrap();
        assert_eq!(window().latest_on_time(), expected);
    }

    #[test]
    fn test_template_weekday_applicability() {
        let template = ShiftTemplate {
            code: "general".to_string(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            grace_minutes: 10,
            weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        };
        assert!(template.applies_on(Weekday::Mon));
        assert!(!template.applies_on(Weekday::Sun));
    }
}
