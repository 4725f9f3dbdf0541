//! The leave-balance accounting engine.
//!
//! Tracks accrual and consumption of leave entitlement per (employee,
//! leave type, year), answers "can this leave be granted", and applies
//! or reverses approved requests. Balance mutations happen only through
//! [`LeaveBalanceEngine::apply`] and [`LeaveBalanceEngine::reverse`];
//! the caller serializes them per balance key.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DateRange, DecisionOutcome, Employee, LeaveBalance, LeaveRequest, RequestState,
};
use crate::scheduling::HolidayCalendar;

/// The answer to "can this leave be granted".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrantCheck {
    /// Whether the balance covers the requested days.
    pub allowed: bool,
    /// Business days the range covers.
    pub requested_days: Decimal,
    /// How many days the balance falls short by; zero when allowed.
    pub shortfall: Decimal,
}

/// Creates, decides, applies, and reverses leave requests against
/// balances.
#[derive(Debug, Clone, Default)]
pub struct LeaveBalanceEngine;

impl LeaveBalanceEngine {
    /// Creates a new accounting engine.
    pub fn new() -> Self {
        LeaveBalanceEngine
    }

    /// Business days the range covers for this employee: days that are
    /// neither holidays nor the employee's off days. Employees without
    /// configured weekly off days default to Saturday and Sunday off.
    pub fn requested_business_days(
        &self,
        employee: &Employee,
        range: &DateRange,
        calendar: &dyn HolidayCalendar,
    ) -> Decimal {
        let days = range
            .iter_days()
            .filter(|date| self.is_business_day(employee, *date, calendar))
            .count();
        Decimal::from(days as u64)
    }

    /// True when the date is a working day for this employee: neither a
    /// holiday nor one of their off days.
    pub fn is_business_day(
        &self,
        employee: &Employee,
        date: NaiveDate,
        calendar: &dyn HolidayCalendar,
    ) -> bool {
        !calendar.is_holiday(date) && !is_off_day(employee, date.weekday())
    }

    /// Compares requested days against the available balance.
    pub fn can_grant(&self, balance: &LeaveBalance, requested_days: Decimal) -> GrantCheck {
        let shortfall = (requested_days - balance.available()).max(Decimal::ZERO);
        GrantCheck {
            allowed: shortfall.is_zero(),
            requested_days,
            shortfall,
        }
    }

    /// Creates a pending leave request.
    ///
    /// `overlapping` carries the range of an existing pending or
    /// approved request covering any of the same days, detected by the
    /// caller against stored requests.
    ///
    /// # Errors
    ///
    /// - `OverlappingLeave` when another request covers the range
    /// - `InsufficientBalance` when the balance falls short and no
    ///   override was granted
    #[allow(clippy::too_many_arguments)]
    pub fn create_request(
        &self,
        employee_id: &str,
        leave_type: &str,
        range: DateRange,
        reason: impl Into<String>,
        requested_days: Decimal,
        balance: &LeaveBalance,
        override_shortfall: bool,
        overlapping: Option<DateRange>,
    ) -> EngineResult<LeaveRequest> {
        if let Some(existing) = overlapping {
            return Err(EngineError::OverlappingLeave {
                from: existing.from,
                to: existing.to,
            });
        }

        let check = self.can_grant(balance, requested_days);
        if !check.allowed && !override_shortfall {
            return Err(EngineError::InsufficientBalance {
                requested: requested_days,
                available: balance.available(),
            });
        }

        Ok(LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            leave_type: leave_type.to_string(),
            range,
            reason: reason.into(),
            requested_days,
            state: RequestState::Pending,
            override_shortfall,
            applied: false,
            decided_by: None,
        })
    }

    /// Applies an approver's decision to a pending request.
    ///
    /// Returns true when the outcome was `Approve`, signaling the caller
    /// to apply the debit and mark the covered days on leave.
    pub fn decide(
        &self,
        request: &mut LeaveRequest,
        approver_id: &str,
        outcome: DecisionOutcome,
        approver_has_authority: bool,
    ) -> EngineResult<bool> {
        if request.state.is_terminal() {
            return Err(EngineError::AlreadyDecided {
                request_id: request.id,
            });
        }
        if !approver_has_authority {
            return Err(EngineError::Unauthorized {
                actor_id: approver_id.to_string(),
                employee_id: request.employee_id.clone(),
            });
        }

        request.state = match outcome {
            DecisionOutcome::Approve => RequestState::Approved,
            DecisionOutcome::Reject => RequestState::Rejected,
        };
        request.decided_by = Some(approver_id.to_string());
        Ok(outcome == DecisionOutcome::Approve)
    }

    /// Cancels a pending request. No balance was debited, so nothing is
    /// re-credited. Once approved, cancellation goes through
    /// [`LeaveBalanceEngine::reverse`] instead.
    pub fn cancel(&self, request: &mut LeaveRequest, actor_id: &str) -> EngineResult<()> {
        if request.employee_id != actor_id {
            return Err(EngineError::Unauthorized {
                actor_id: actor_id.to_string(),
                employee_id: request.employee_id.clone(),
            });
        }
        if request.state.is_terminal() {
            return Err(EngineError::AlreadyDecided {
                request_id: request.id,
            });
        }

        request.state = RequestState::Cancelled;
        Ok(())
    }

    /// Debits the balance for an approved request.
    ///
    /// Idempotent: a request that was already applied is left untouched,
    /// so replaying the same approval never double-debits. A debit that
    /// pushes consumption past the accrued total is permitted only for
    /// override requests and is logged as a negative-balance event.
    pub fn apply(&self, request: &mut LeaveRequest, balance: &mut LeaveBalance) -> EngineResult<()> {
        if request.state != RequestState::Approved {
            return Err(EngineError::NotApproved {
                request_id: request.id,
            });
        }
        if request.applied {
            return Ok(());
        }

        balance.consumed += request.requested_days;
        request.applied = true;

        if balance.available() < Decimal::ZERO {
            warn!(
                employee_id = %request.employee_id,
                leave_type = %request.leave_type,
                overdrawn = %(-balance.available()),
                request_id = %request.id,
                "negative balance override applied"
            );
        }
        Ok(())
    }

    /// Re-credits the balance for a previously applied approval and
    /// marks the request cancelled.
    ///
    /// # Errors
    ///
    /// `NotReversible` when the request was never applied or is not in
    /// the approved state.
    pub fn reverse(
        &self,
        request: &mut LeaveRequest,
        balance: &mut LeaveBalance,
    ) -> EngineResult<()> {
        if request.state != RequestState::Approved || !request.applied {
            return Err(EngineError::NotReversible {
                request_id: request.id,
            });
        }

        balance.consumed -= request.requested_days;
        request.applied = false;
        request.state = RequestState::Cancelled;
        Ok(())
    }
}

fn is_off_day(employee: &Employee, weekday: Weekday) -> bool {
    if employee.weekly_off.is_empty() {
        matches!(weekday, Weekday::Sat | Weekday::Sun)
    } else {
        employee.is_weekly_off(weekday)
    }
}

/// Builds a year-opening balance for an employee and leave type.
pub(crate) fn opening_balance(
    employee_id: &str,
    leave_type: &crate::models::LeaveType,
    year: i32,
    as_of: NaiveDate,
    carried_over: Decimal,
) -> LeaveBalance {
    LeaveBalance {
        employee_id: employee_id.to_string(),
        leave_type: leave_type.code.clone(),
        year,
        entitled: leave_type.annual_entitlement,
        accrued_to_date: leave_type.accrued_to_date(as_of),
        consumed: Decimal::ZERO,
        carried_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualRule, LeaveType};
    use crate::scheduling::StaticHolidayCalendar;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Asha Rao".to_string(),
            shift_template: "general".to_string(),
            site_id: "hq".to_string(),
            manager_id: Some("emp_100".to_string()),
            weekly_off: vec![Weekday::Sat, Weekday::Sun],
            active: true,
        }
    }

    fn balance(accrued: i64, consumed: i64) -> LeaveBalance {
        LeaveBalance {
            employee_id: "emp_001".to_string(),
            leave_type: "casual".to_string(),
            year: 2026,
            entitled: Decimal::new(12, 0),
            accrued_to_date: Decimal::new(accrued, 0),
            consumed: Decimal::new(consumed, 0),
            carried_over: Decimal::ZERO,
        }
    }

    fn approved_request(days: i64) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type: "casual".to_string(),
            range: DateRange::new(make_date("2026-03-02"), make_date("2026-03-04")).unwrap(),
            reason: "family event".to_string(),
            requested_days: Decimal::new(days, 0),
            state: RequestState::Approved,
            override_shortfall: false,
            applied: false,
            decided_by: Some("emp_100".to_string()),
        }
    }

    #[test]
    fn test_business_days_skip_weekends() {
        // Mon 2026-03-02 through Sun 2026-03-08: five business days.
        let engine = LeaveBalanceEngine::new();
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-08")).unwrap();
        let calendar = StaticHolidayCalendar::default();
        assert_eq!(
            engine.requested_business_days(&employee(), &range, &calendar),
            Decimal::new(5, 0)
        );
    }

    #[test]
    fn test_business_days_skip_holidays() {
        let engine = LeaveBalanceEngine::new();
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-04")).unwrap();
        let calendar = StaticHolidayCalendar::new(vec![make_date("2026-03-03")]);
        assert_eq!(
            engine.requested_business_days(&employee(), &range, &calendar),
            Decimal::new(2, 0)
        );
    }

    #[test]
    fn test_can_grant_reports_shortfall() {
        // Accrued 2, consumed 0, requesting 3: shortfall of 1.
        let engine = LeaveBalanceEngine::new();
        let check = engine.can_grant(&balance(2, 0), Decimal::new(3, 0));
        assert!(!check.allowed);
        assert_eq!(check.shortfall, Decimal::new(1, 0));
    }

    #[test]
    fn test_can_grant_allows_exact_balance() {
        let engine = LeaveBalanceEngine::new();
        let check = engine.can_grant(&balance(3, 0), Decimal::new(3, 0));
        assert!(check.allowed);
        assert_eq!(check.shortfall, Decimal::ZERO);
    }

    #[test]
    fn test_create_request_rejects_shortfall_without_override() {
        let engine = LeaveBalanceEngine::new();
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-04")).unwrap();
        let result = engine.create_request(
            "emp_001",
            "casual",
            range,
            "family event",
            Decimal::new(3, 0),
            &balance(2, 0),
            false,
            None,
        );
        assert!(matches!(
            result,
            Err(EngineError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_create_request_with_override_proceeds() {
        let engine = LeaveBalanceEngine::new();
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-04")).unwrap();
        let request = engine
            .create_request(
                "emp_001",
                "casual",
                range,
                "family event",
                Decimal::new(3, 0),
                &balance(2, 0),
                true,
                None,
            )
            .unwrap();
        assert!(request.override_shortfall);
        assert_eq!(request.state, RequestState::Pending);
    }

    #[test]
    fn test_create_request_rejects_overlap() {
        let engine = LeaveBalanceEngine::new();
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-04")).unwrap();
        let existing = DateRange::new(make_date("2026-03-04"), make_date("2026-03-05")).unwrap();
        let result = engine.create_request(
            "emp_001",
            "casual",
            range,
            "family event",
            Decimal::new(3, 0),
            &balance(5, 0),
            false,
            Some(existing),
        );
        assert!(matches!(result, Err(EngineError::OverlappingLeave { .. })));
    }

    #[test]
    fn test_apply_debits_once() {
        let engine = LeaveBalanceEngine::new();
        let mut request = approved_request(3);
        let mut bal = balance(6, 0);

        engine.apply(&mut request, &mut bal).unwrap();
        assert_eq!(bal.consumed, Decimal::new(3, 0));

        // Replaying the same approval must not double-debit.
        engine.apply(&mut request, &mut bal).unwrap();
        assert_eq!(bal.consumed, Decimal::new(3, 0));
    }

    #[test]
    fn test_apply_requires_approved_state() {
        let engine = LeaveBalanceEngine::new();
        let mut request = approved_request(3);
        request.state = RequestState::Pending;
        let mut bal = balance(6, 0);
        assert!(engine.apply(&mut request, &mut bal).is_err());
        assert_eq!(bal.consumed, Decimal::ZERO);
    }

    #[test]
    fn test_reverse_recredits_and_cancels() {
        let engine = LeaveBalanceEngine::new();
        let mut request = approved_request(3);
        let mut bal = balance(6, 0);
        engine.apply(&mut request, &mut bal).unwrap();

        engine.reverse(&mut request, &mut bal).unwrap();
        assert_eq!(bal.consumed, Decimal::ZERO);
        assert_eq!(request.state, RequestState::Cancelled);
        assert!(!request.applied);
    }

    #[test]
    fn test_reverse_requires_applied_approval() {
        let engine = LeaveBalanceEngine::new();
        let mut request = approved_request(3);
        let mut bal = balance(6, 0);
        let result = engine.reverse(&mut request, &mut bal);
        assert!(matches!(result, Err(EngineError::NotReversible { .. })));
    }

    #[test]
    fn test_decide_approve_then_second_decision_fails() {
        let engine = LeaveBalanceEngine::new();
        let mut request = approved_request(3);
        request.state = RequestState::Pending;
        request.decided_by = None;

        let apply = engine
            .decide(&mut request, "emp_100", DecisionOutcome::Approve, true)
            .unwrap();
        assert!(apply);

        let result = engine.decide(&mut request, "emp_100", DecisionOutcome::Approve, true);
        assert!(matches!(result, Err(EngineError::AlreadyDecided { .. })));
    }

    #[test]
    fn test_opening_balance_uses_accrual_rule() {
        let casual = LeaveType {
            code: "casual".to_string(),
            name: "Casual Leave".to_string(),
            annual_entitlement: Decimal::new(12, 0),
            accrual: AccrualRule::Monthly,
        };
        let bal = opening_balance("emp_001", &casual, 2026, make_date("2026-06-15"), Decimal::ZERO);
        assert_eq!(bal.accrued_to_date, Decimal::new(6, 0));
        assert_eq!(bal.available(), Decimal::new(6, 0));
    }
}
