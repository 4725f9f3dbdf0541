//! Shift resolution.
//!
//! Determines the shift window expected of an employee on a given date,
//! taking weekday applicability, weekly off days, holidays, and approved
//! leave into account. Resolution is a pure function of its inputs at
//! call time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, ShiftTemplate, ShiftWindow};

/// Holiday determination, supplied by an external calendar service.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if the given date is a holiday (no shift expected).
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A fixed holiday list, suitable for configuration-driven deployments
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

impl StaticHolidayCalendar {
    /// Creates a calendar from an explicit holiday list.
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        StaticHolidayCalendar {
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

/// Resolves the shift window applicable to an employee on a date.
#[derive(Clone)]
pub struct ShiftResolver {
    templates: HashMap<String, ShiftTemplate>,
    calendar: Arc<dyn HolidayCalendar>,
}

impl ShiftResolver {
    /// Builds a resolver over the configured shift templates.
    pub fn new(config: &ConfigLoader, calendar: Arc<dyn HolidayCalendar>) -> Self {
        ShiftResolver {
            templates: config
                .shift_templates()
                .map(|t| (t.code.clone(), t.clone()))
                .collect(),
            calendar,
        }
    }

    /// Builds a resolver over an explicit template list.
    pub fn from_templates(
        templates: Vec<ShiftTemplate>,
        calendar: Arc<dyn HolidayCalendar>,
    ) -> Self {
        ShiftResolver {
            templates: templates.into_iter().map(|t| (t.code.clone(), t)).collect(),
            calendar,
        }
    }

    /// Resolves the expected shift window for `employee` on `date`.
    ///
    /// Returns `Ok(None)` when no shift is expected: the date is a
    /// holiday, a weekly off day, covered by approved leave, or outside
    /// the template's weekday set.
    ///
    /// `declared_shift`, when present, overrides the employee's assigned
    /// template (a device may declare the shift being worked); it must
    /// still name a known template.
    pub fn resolve(
        &self,
        employee: &Employee,
        date: NaiveDate,
        declared_shift: Option<&str>,
        on_approved_leave: bool,
    ) -> EngineResult<Option<ShiftWindow>> {
        let code = declared_shift.unwrap_or(&employee.shift_template);
        let template =
            self.templates
                .get(code)
                .ok_or_else(|| EngineError::UnknownShiftTemplate {
                    code: code.to_string(),
                })?;

        if on_approved_leave || self.calendar.is_holiday(date) {
            return Ok(None);
        }

        let weekday = date.weekday();
        if employee.is_weekly_off(weekday) || !template.applies_on(weekday) {
            return Ok(None);
        }

        Ok(Some(ShiftWindow {
            date,
            start: template.start,
            end: template.end,
            grace_minutes: template.grace_minutes,
        }))
    }
}
