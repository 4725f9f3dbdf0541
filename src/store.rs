//! In-memory record tables.
//!
//! The storage layer the engine mutates through its owning operations.
//! Tables are keyed exactly as the data model describes: attendance by
//! (employee, date), balances by (employee, leave type, year), requests
//! by id. No other code path writes these records directly; callers
//! needing durable persistence put an adapter behind the same methods.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDay, DateRange, Employee, FaceEnrollment, LeaveBalance, LeaveRequest,
    RegularizationRequest, RequestState,
};

/// Key of a leave balance record.
pub type BalanceKey = (String, String, i32);

/// The engine's record tables.
#[derive(Debug, Default)]
pub struct RecordStore {
    employees: RwLock<HashMap<String, Employee>>,
    enrollments: RwLock<HashMap<String, FaceEnrollment>>,
    attendance: RwLock<HashMap<(String, NaiveDate), AttendanceDay>>,
    regularizations: RwLock<HashMap<Uuid, RegularizationRequest>>,
    leave_requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    balances: RwLock<HashMap<BalanceKey, LeaveBalance>>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        RecordStore::default()
    }

    /// Inserts or replaces an employee record.
    pub fn put_employee(&self, employee: Employee) {
        self.employees
            .write()
            .expect("poisoned lock")
            .insert(employee.id.clone(), employee);
    }

    /// Fetches an active employee.
    ///
    /// Soft-deactivated employees keep their history but are treated as
    /// unknown for new events.
    pub fn active_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .read()
            .expect("poisoned lock")
            .get(employee_id)
            .filter(|e| e.active)
            .cloned()
            .ok_or_else(|| EngineError::UnknownEmployee {
                employee_id: employee_id.to_string(),
            })
    }

    /// Atomically replaces an employee's enrollment set.
    pub fn replace_enrollment(&self, enrollment: FaceEnrollment) {
        self.enrollments
            .write()
            .expect("poisoned lock")
            .insert(enrollment.employee_id.clone(), enrollment);
    }

    /// Fetches an employee's enrollment, empty if none was captured.
    pub fn enrollment(&self, employee_id: &str) -> FaceEnrollment {
        self.enrollments
            .read()
            .expect("poisoned lock")
            .get(employee_id)
            .cloned()
            .unwrap_or_else(|| FaceEnrollment {
                employee_id: employee_id.to_string(),
                embeddings: vec![],
            })
    }

    /// Every enrollment except the given employee's, for cross-checks.
    pub fn rival_enrollments(&self, employee_id: &str) -> Vec<FaceEnrollment> {
        self.enrollments
            .read()
            .expect("poisoned lock")
            .values()
            .filter(|e| e.employee_id != employee_id)
            .cloned()
            .collect()
    }

    /// Fetches the attendance day for (employee, date), if recorded.
    pub fn attendance_day(&self, employee_id: &str, date: NaiveDate) -> Option<AttendanceDay> {
        self.attendance
            .read()
            .expect("poisoned lock")
            .get(&(employee_id.to_string(), date))
            .cloned()
    }

    /// Inserts or replaces an attendance day.
    pub fn put_attendance_day(&self, day: AttendanceDay) {
        self.attendance
            .write()
            .expect("poisoned lock")
            .insert((day.employee_id.clone(), day.date), day);
    }

    /// Every recorded day for the employee in the given month, ordered
    /// by date.
    pub fn attendance_days_in_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Vec<AttendanceDay> {
        let mut days: Vec<AttendanceDay> = self
            .attendance
            .read()
            .expect("poisoned lock")
            .values()
            .filter(|d| {
                d.employee_id == employee_id && d.date.year() == year && d.date.month() == month
            })
            .cloned()
            .collect();
        days.sort_by_key(|d| d.date);
        days
    }

    /// Inserts or replaces a regularization request.
    pub fn put_regularization(&self, request: RegularizationRequest) {
        self.regularizations
            .write()
            .expect("poisoned lock")
            .insert(request.id, request);
    }

    /// Fetches a regularization request.
    pub fn regularization(&self, request_id: Uuid) -> EngineResult<RegularizationRequest> {
        self.regularizations
            .read()
            .expect("poisoned lock")
            .get(&request_id)
            .cloned()
            .ok_or(EngineError::RequestNotFound { request_id })
    }

    /// True when a pending or approved regularization already covers
    /// the date.
    pub fn has_active_regularization(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.regularizations
            .read()
            .expect("poisoned lock")
            .values()
            .any(|r| {
                r.employee_id == employee_id
                    && r.date == date
                    && matches!(r.state, RequestState::Pending | RequestState::Approved)
            })
    }

    /// Inserts or replaces a leave request.
    pub fn put_leave_request(&self, request: LeaveRequest) {
        self.leave_requests
            .write()
            .expect("poisoned lock")
            .insert(request.id, request);
    }

    /// Fetches a leave request.
    pub fn leave_request(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        self.leave_requests
            .read()
            .expect("poisoned lock")
            .get(&request_id)
            .cloned()
            .ok_or(EngineError::RequestNotFound { request_id })
    }

    /// The range of an existing pending or approved leave request that
    /// overlaps `range`, if any.
    pub fn overlapping_leave(&self, employee_id: &str, range: &DateRange) -> Option<DateRange> {
        self.leave_requests
            .read()
            .expect("poisoned lock")
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && matches!(r.state, RequestState::Pending | RequestState::Approved)
            })
            .find(|r| r.range.overlaps(range))
            .map(|r| r.range)
    }

    /// True when an applied leave approval covers the date.
    pub fn approved_leave_on(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.leave_requests
            .read()
            .expect("poisoned lock")
            .values()
            .any(|r| {
                r.employee_id == employee_id
                    && r.state == RequestState::Approved
                    && r.applied
                    && r.range.contains(date)
            })
    }

    /// Fetches a leave balance, if one has been materialized.
    pub fn balance(&self, key: &BalanceKey) -> Option<LeaveBalance> {
        self.balances.read().expect("poisoned lock").get(key).cloned()
    }

    /// Inserts or replaces a leave balance.
    pub fn put_balance(&self, balance: LeaveBalance) {
        let key = (
            balance.employee_id.clone(),
            balance.leave_type.clone(),
            balance.year,
        );
        self.balances.write().expect("poisoned lock").insert(key, balance);
    }

    /// Every materialized balance for the employee in the given year.
    pub fn balances_for(&self, employee_id: &str, year: i32) -> Vec<LeaveBalance> {
        let mut balances: Vec<LeaveBalance> = self
            .balances
            .read()
            .expect("poisoned lock")
            .values()
            .filter(|b| b.employee_id == employee_id && b.year == year)
            .cloned()
            .collect();
        balances.sort_by(|a, b| a.leave_type.cmp(&b.leave_type));
        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee(id: &str, active: bool) -> Employee {
        Employee {
            id: id.to_string(),
            name: "Test".to_string(),
            shift_template: "general".to_string(),
            site_id: "hq".to_string(),
            manager_id: None,
            weekly_off: vec![],
            active,
        }
    }

    #[test]
    fn test_inactive_employee_is_unknown_for_new_events() {
        let store = RecordStore::new();
        store.put_employee(employee("emp_001", false));
        assert!(matches!(
            store.active_employee("emp_001"),
            Err(EngineError::UnknownEmployee { .. })
        ));
    }

    #[test]
    fn test_enrollment_defaults_to_empty() {
        let store = RecordStore::new();
        assert!(store.enrollment("emp_001").is_empty());
    }

    #[test]
    fn test_attendance_days_in_month_filters_and_sorts() {
        let store = RecordStore::new();
        store.put_attendance_day(AttendanceDay::new("emp_001", make_date("2026-03-04")));
        store.put_attendance_day(AttendanceDay::new("emp_001", make_date("2026-03-02")));
        store.put_attendance_day(AttendanceDay::new("emp_001", make_date("2026-04-01")));
        store.put_attendance_day(AttendanceDay::new("emp_002", make_date("2026-03-02")));

        let days = store.attendance_days_in_month("emp_001", 2026, 3);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, make_date("2026-03-02"));
        assert_eq!(days[1].date, make_date("2026-03-04"));
    }

    #[test]
    fn test_missing_request_is_not_found() {
        let store = RecordStore::new();
        assert!(matches!(
            store.regularization(Uuid::new_v4()),
            Err(EngineError::RequestNotFound { .. })
        ));
    }
}
