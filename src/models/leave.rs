//! Leave catalog, request, and balance models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::regularization::RequestState;

/// How leave entitlement accrues over the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualRule {
    /// The full annual entitlement is available from January 1st.
    UpFront,
    /// One twelfth of the annual entitlement accrues at the start of
    /// each month.
    Monthly,
}

/// A catalog entry describing one kind of leave (e.g. casual, sick).
///
/// Static reference data loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Short code identifying the leave type (e.g. "casual").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Days of entitlement per calendar year.
    pub annual_entitlement: Decimal,
    /// How the entitlement accrues.
    pub accrual: AccrualRule,
}

impl LeaveType {
    /// Days accrued from January 1st of `as_of`'s year up to `as_of`,
    /// per this type's accrual rule.
    pub fn accrued_to_date(&self, as_of: NaiveDate) -> Decimal {
        use chrono::Datelike;
        match self.accrual {
            AccrualRule::UpFront => self.annual_entitlement,
            AccrualRule::Monthly => {
                let months = Decimal::from(as_of.month());
                (self.annual_entitlement * months / Decimal::new(12, 0)).round_dp(2)
            }
        }
    }
}

/// An inclusive date range, validated so that `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> EngineResult<Self> {
        if from > to {
            return Err(EngineError::InvalidDateRange { from, to });
        }
        Ok(DateRange { from, to })
    }

    /// Returns true if the given date falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Returns true if this range shares at least one day with `other`.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Iterates every date in the range, inclusive on both ends.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let mut current = Some(self.from);
        let to = self.to;
        std::iter::from_fn(move || {
            let date = current?;
            if date > to {
                return None;
            }
            current = date.succ_opt();
            Some(date)
        })
    }
}

/// An employee's request for leave over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// Code of the requested [`LeaveType`].
    pub leave_type: String,
    /// The requested date range.
    pub range: DateRange,
    /// Free-text justification supplied by the employee.
    pub reason: String,
    /// Business days the request covers, computed at creation.
    pub requested_days: Decimal,
    /// Current lifecycle state.
    pub state: RequestState,
    /// Set when an approver authorized a negative-balance override.
    pub override_shortfall: bool,
    /// Set once the approved request has been applied to the balance.
    /// Guards against double-debit and gates reversal.
    pub applied: bool,
    /// The approver who decided the request, once decided.
    pub decided_by: Option<String>,
}

/// Leave balance for one (employee, leave type, year).
///
/// Invariant: `consumed <= accrued_to_date + carried_over` unless a
/// negative-balance override was granted (logged as a policy event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub employee_id: String,
    /// Code of the leave type this balance tracks.
    pub leave_type: String,
    /// The calendar year of the balance.
    pub year: i32,
    /// The full annual entitlement.
    pub entitled: Decimal,
    /// Days accrued so far this year.
    pub accrued_to_date: Decimal,
    /// Days consumed by applied leave requests.
    pub consumed: Decimal,
    /// Days carried over from the previous year.
    pub carried_over: Decimal,
}

impl LeaveBalance {
    /// Days currently available for new leave.
    pub fn available(&self) -> Decimal {
        self.accrued_to_date + self.carried_over - self.consumed
    }
}
