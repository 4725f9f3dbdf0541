//! The attendance engine facade.
//!
//! [`AttendanceEngine`] wires verification, scheduling, the clock-event
//! state machine, the approval workflows, and leave accounting over one
//! [`RecordStore`], and owns all cross-record concurrency control.
//!
//! Two lock families serialize mutations: per-(employee, date) day locks
//! and per-(employee, leave type, year) balance locks. Leave operations
//! take the balance lock first and day locks one at a time underneath
//! it; attendance operations take only day locks. No code path acquires
//! a balance lock while holding a day lock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::{AttendanceStateMachine, RegularizationWorkflow};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::leave::{opening_balance, LeaveBalanceEngine};
use crate::models::{
    AttendanceDay, DateRange, DecisionOutcome, Embedding, Employee, FaceEnrollment, LeaveBalance,
    LeaveRequest, LeaveType,
};
use crate::report::{MonthlySummary, ReportAggregator};
use crate::scheduling::{HolidayCalendar, ShiftResolver};
use crate::store::{BalanceKey, RecordStore};
use crate::sync::KeyedLocks;
use crate::verification::{FaceMatcher, GeoDecision, GeofenceValidator, MatchDecision};

/// Approval authority, supplied by the organization's reporting lines.
pub trait ReportingHierarchy: Send + Sync {
    /// Returns true when `approver_id` may decide requests belonging to
    /// `employee_id`.
    fn has_authority(&self, approver_id: &str, employee_id: &str) -> bool;
}

/// Authority by management chain: an approver has authority over every
/// employee below them, at any depth. Nobody has authority over
/// themselves.
pub struct ManagerChainHierarchy {
    store: Arc<RecordStore>,
}

impl ManagerChainHierarchy {
    /// Creates a hierarchy reading reporting lines from the store.
    pub fn new(store: Arc<RecordStore>) -> Self {
        ManagerChainHierarchy { store }
    }
}

impl ReportingHierarchy for ManagerChainHierarchy {
    fn has_authority(&self, approver_id: &str, employee_id: &str) -> bool {
        if approver_id == employee_id {
            return false;
        }
        // Cycle guard: a miswired chain must terminate, not spin.
        let mut seen = HashSet::new();
        let mut current = employee_id.to_string();
        while seen.insert(current.clone()) {
            let Ok(employee) = self.store.active_employee(&current) else {
                return false;
            };
            match employee.manager_id {
                Some(manager) if manager == approver_id => return true,
                Some(manager) => current = manager,
                None => return false,
            }
        }
        false
    }
}

/// The engine facade: every workforce operation enters here.
pub struct AttendanceEngine {
    settings: crate::config::EngineSettings,
    leave_types: HashMap<String, LeaveType>,
    store: Arc<RecordStore>,
    face: FaceMatcher,
    geofence: GeofenceValidator,
    shifts: ShiftResolver,
    state_machine: AttendanceStateMachine,
    regularization: RegularizationWorkflow,
    leave: LeaveBalanceEngine,
    reports: ReportAggregator,
    calendar: Arc<dyn HolidayCalendar>,
    hierarchy: Arc<dyn ReportingHierarchy>,
    day_locks: KeyedLocks<(String, NaiveDate)>,
    balance_locks: KeyedLocks<BalanceKey>,
}

impl AttendanceEngine {
    /// Wires an engine over the given store, calendar, and hierarchy.
    pub fn new(
        config: &ConfigLoader,
        store: Arc<RecordStore>,
        calendar: Arc<dyn HolidayCalendar>,
        hierarchy: Arc<dyn ReportingHierarchy>,
    ) -> Self {
        let settings = config.settings().clone();
        AttendanceEngine {
            face: FaceMatcher::new(settings.face.clone()),
            geofence: GeofenceValidator::new(config),
            shifts: ShiftResolver::new(config, Arc::clone(&calendar)),
            state_machine: AttendanceStateMachine::new(settings.attendance.clone()),
            regularization: RegularizationWorkflow::new(settings.regularization.clone()),
            leave: LeaveBalanceEngine::new(),
            reports: ReportAggregator::new(),
            leave_types: config
                .leave_types()
                .map(|lt| (lt.code.clone(), lt.clone()))
                .collect(),
            settings,
            store,
            calendar,
            hierarchy,
            day_locks: KeyedLocks::new(),
            balance_locks: KeyedLocks::new(),
        }
    }

    /// Wires an engine whose approval authority follows the manager
    /// chain recorded on employees.
    pub fn with_manager_chain(
        config: &ConfigLoader,
        store: Arc<RecordStore>,
        calendar: Arc<dyn HolidayCalendar>,
    ) -> Self {
        let hierarchy = Arc::new(ManagerChainHierarchy::new(Arc::clone(&store)));
        AttendanceEngine::new(config, store, calendar, hierarchy)
    }

    /// Validates and stores a fresh enrollment capture set for an
    /// employee, replacing any previous set atomically.
    pub fn enroll_faces(&self, employee_id: &str, captures: Vec<Embedding>) -> EngineResult<()> {
        let employee = self.store.active_employee(employee_id)?;
        self.face.check_enrollment(&captures)?;
        self.store.replace_enrollment(FaceEnrollment {
            employee_id: employee.id.clone(),
            embeddings: captures,
        });
        info!(employee_id = %employee.id, "face enrollment replaced");
        Ok(())
    }

    /// Records a verified clock-in for the employee on the timestamp's
    /// date.
    ///
    /// Face matching and geofence validation run concurrently under the
    /// configured timeout; either rejection, or the timeout, fails the
    /// event without touching the day.
    pub async fn clock_in(
        &self,
        employee_id: &str,
        timestamp: NaiveDateTime,
        probe: &Embedding,
        lat: f64,
        lon: f64,
        declared_shift: Option<&str>,
    ) -> EngineResult<AttendanceDay> {
        let correlation_id = Uuid::new_v4();
        let employee = self.store.active_employee(employee_id)?;
        let date = timestamp.date();

        let _guard = self.day_locks.lock((employee.id.clone(), date)).await;

        let (face, geo) = self.verify(&employee, probe, lat, lon).await?;
        let site_radius = self.geofence.site_radius(&employee.site_id)?;

        let on_leave = self.on_approved_leave(&employee, date);
        let window = self.shifts.resolve(&employee, date, declared_shift, on_leave)?;

        let mut day = self
            .store
            .attendance_day(&employee.id, date)
            .unwrap_or_else(|| AttendanceDay::new(&employee.id, date));
        day.on_leave = on_leave;
        self.state_machine
            .clock_in(&mut day, timestamp, &face, &geo, site_radius, window.as_ref())?;
        self.store.put_attendance_day(day.clone());

        info!(
            %correlation_id,
            employee_id = %employee.id,
            %date,
            confidence = face.confidence,
            distance_meters = geo.distance_meters,
            status = %day.status,
            "clock-in recorded"
        );
        Ok(day)
    }

    /// Records a verified clock-out, closing the day and finalizing its
    /// status.
    pub async fn clock_out(
        &self,
        employee_id: &str,
        timestamp: NaiveDateTime,
        probe: &Embedding,
        lat: f64,
        lon: f64,
        declared_shift: Option<&str>,
    ) -> EngineResult<AttendanceDay> {
        let correlation_id = Uuid::new_v4();
        let employee = self.store.active_employee(employee_id)?;
        let date = timestamp.date();

        let _guard = self.day_locks.lock((employee.id.clone(), date)).await;

        let (face, geo) = self.verify(&employee, probe, lat, lon).await?;
        if !face.accepted {
            warn!(
                %correlation_id,
                employee_id = %employee.id,
                confidence = face.confidence,
                "clock-out face rejected"
            );
            return Err(EngineError::FaceRejected {
                confidence: face.confidence,
            });
        }
        if !geo.inside {
            return Err(EngineError::OutsideGeofence {
                distance_meters: geo.distance_meters,
                radius_meters: self.geofence.site_radius(&employee.site_id)?,
            });
        }

        let on_leave = self.on_approved_leave(&employee, date);
        let window = self.shifts.resolve(&employee, date, declared_shift, on_leave)?;

        let mut day = self
            .store
            .attendance_day(&employee.id, date)
            .unwrap_or_else(|| AttendanceDay::new(&employee.id, date));
        self.state_machine
            .clock_out(&mut day, timestamp, window.as_ref())?;
        self.store.put_attendance_day(day.clone());

        info!(
            %correlation_id,
            employee_id = %employee.id,
            %date,
            worked_hours = %day.worked_hours(),
            status = %day.status,
            "clock-out recorded"
        );
        Ok(day)
    }

    /// Creates a pending correction request for an attendance day.
    pub async fn create_regularization(
        &self,
        employee_id: &str,
        date: NaiveDate,
        proposed_clock_in: Option<NaiveDateTime>,
        proposed_clock_out: Option<NaiveDateTime>,
        reason: &str,
    ) -> EngineResult<Uuid> {
        let employee = self.store.active_employee(employee_id)?;
        let _guard = self.day_locks.lock((employee.id.clone(), date)).await;

        let day_exists = self.store.attendance_day(&employee.id, date).is_some();
        let duplicate = self.store.has_active_regularization(&employee.id, date);
        let request = self.regularization.create(
            &employee.id,
            date,
            proposed_clock_in,
            proposed_clock_out,
            reason,
            day_exists,
            duplicate,
        )?;
        let request_id = request.id;
        self.store.put_regularization(request);

        info!(employee_id = %employee.id, %date, %request_id, "regularization requested");
        Ok(request_id)
    }

    /// Applies an approver's decision to a regularization request.
    ///
    /// On approval the proposed times supersede the recorded ones and
    /// the day's status is recomputed. Returns the attendance day as it
    /// stands after the decision.
    pub async fn decide_regularization(
        &self,
        request_id: Uuid,
        approver_id: &str,
        outcome: DecisionOutcome,
    ) -> EngineResult<AttendanceDay> {
        let found = self.store.regularization(request_id)?;
        let _guard = self
            .day_locks
            .lock((found.employee_id.clone(), found.date))
            .await;
        // Re-read under the day lock; a concurrent decision may have
        // landed between fetch and lock.
        let mut request = self.store.regularization(request_id)?;

        let authority = self
            .hierarchy
            .has_authority(approver_id, &request.employee_id);
        let apply = self
            .regularization
            .decide(&mut request, approver_id, outcome, authority)?;

        let mut day = self
            .store
            .attendance_day(&request.employee_id, request.date)
            .unwrap_or_else(|| AttendanceDay::new(&request.employee_id, request.date));

        if apply {
            let employee = self.store.active_employee(&request.employee_id)?;
            let on_leave = self.on_approved_leave(&employee, request.date);
            let window = self.shifts.resolve(&employee, request.date, None, on_leave)?;
            self.state_machine.apply_correction(
                &mut day,
                request.proposed_clock_in,
                request.proposed_clock_out,
                window.as_ref(),
            )?;
            self.store.put_attendance_day(day.clone());
        }
        self.store.put_regularization(request.clone());

        info!(
            %request_id,
            employee_id = %request.employee_id,
            approver_id,
            state = ?request.state,
            "regularization decided"
        );
        Ok(day)
    }

    /// Cancels a pending regularization request. Only its creator may
    /// cancel.
    pub async fn cancel_regularization(&self, request_id: Uuid, actor_id: &str) -> EngineResult<()> {
        let found = self.store.regularization(request_id)?;
        let _guard = self
            .day_locks
            .lock((found.employee_id.clone(), found.date))
            .await;
        let mut request = self.store.regularization(request_id)?;
        self.regularization.cancel(&mut request, actor_id)?;
        self.store.put_regularization(request);
        Ok(())
    }

    /// Creates a pending leave request over an inclusive date range.
    ///
    /// The requested day count covers business days only. A shortfall
    /// against the available balance rejects the request unless
    /// `override_shortfall` is set.
    pub async fn request_leave(
        &self,
        employee_id: &str,
        leave_type: &str,
        from: NaiveDate,
        to: NaiveDate,
        reason: &str,
        override_shortfall: bool,
    ) -> EngineResult<Uuid> {
        let employee = self.store.active_employee(employee_id)?;
        let catalog = self.leave_type(leave_type)?.clone();
        let range = DateRange::new(from, to)?;
        let year = from.year();

        let key = (employee.id.clone(), catalog.code.clone(), year);
        let _guard = self.balance_locks.lock(key.clone()).await;

        let balance = self.materialized_balance(&employee.id, &catalog, year, from);
        let requested_days =
            self.leave
                .requested_business_days(&employee, &range, self.calendar.as_ref());
        let overlapping = self.store.overlapping_leave(&employee.id, &range);
        let request = self.leave.create_request(
            &employee.id,
            &catalog.code,
            range,
            reason,
            requested_days,
            &balance,
            override_shortfall,
            overlapping,
        )?;

        let check = self.leave.can_grant(&balance, requested_days);
        if !check.allowed {
            warn!(
                employee_id = %employee.id,
                leave_type = %catalog.code,
                shortfall = %check.shortfall,
                request_id = %request.id,
                "leave requested with shortfall override"
            );
        }

        let request_id = request.id;
        self.store.put_balance(balance);
        self.store.put_leave_request(request);

        info!(
            employee_id = %employee.id,
            leave_type = %catalog.code,
            %from,
            %to,
            %requested_days,
            %request_id,
            "leave requested"
        );
        Ok(request_id)
    }

    /// Applies an approver's decision to a leave request.
    ///
    /// Approval debits the balance exactly once and marks the covered
    /// business days on leave. Returns the balance as it stands after
    /// the decision.
    pub async fn decide_leave(
        &self,
        request_id: Uuid,
        approver_id: &str,
        outcome: DecisionOutcome,
    ) -> EngineResult<LeaveBalance> {
        let found = self.store.leave_request(request_id)?;
        let key = (
            found.employee_id.clone(),
            found.leave_type.clone(),
            found.range.from.year(),
        );
        let _guard = self.balance_locks.lock(key.clone()).await;
        let mut request = self.store.leave_request(request_id)?;

        let authority = self
            .hierarchy
            .has_authority(approver_id, &request.employee_id);
        let apply = self
            .leave
            .decide(&mut request, approver_id, outcome, authority)?;

        let catalog = self.leave_type(&request.leave_type)?.clone();
        let mut balance =
            self.materialized_balance(&request.employee_id, &catalog, key.2, request.range.from);

        if apply {
            self.leave.apply(&mut request, &mut balance)?;
            self.store.put_balance(balance.clone());
            self.store.put_leave_request(request.clone());
            self.mark_leave_days(&request, true).await?;
        } else {
            self.store.put_leave_request(request.clone());
        }

        info!(
            %request_id,
            employee_id = %request.employee_id,
            approver_id,
            state = ?request.state,
            "leave decided"
        );
        Ok(balance)
    }

    /// Cancels a pending leave request. Only its creator may cancel;
    /// approved leave goes through [`AttendanceEngine::reverse_leave`].
    pub async fn cancel_leave(&self, request_id: Uuid, actor_id: &str) -> EngineResult<()> {
        let found = self.store.leave_request(request_id)?;
        let key = (
            found.employee_id.clone(),
            found.leave_type.clone(),
            found.range.from.year(),
        );
        let _guard = self.balance_locks.lock(key).await;
        let mut request = self.store.leave_request(request_id)?;
        self.leave.cancel(&mut request, actor_id)?;
        self.store.put_leave_request(request);
        Ok(())
    }

    /// Reverses a previously applied leave approval: re-credits the
    /// balance, cancels the request, and clears the on-leave overlay
    /// from the covered days. Requires approval authority.
    pub async fn reverse_leave(
        &self,
        request_id: Uuid,
        actor_id: &str,
    ) -> EngineResult<LeaveBalance> {
        let found = self.store.leave_request(request_id)?;
        let key = (
            found.employee_id.clone(),
            found.leave_type.clone(),
            found.range.from.year(),
        );
        let _guard = self.balance_locks.lock(key.clone()).await;
        let mut request = self.store.leave_request(request_id)?;

        if !self.hierarchy.has_authority(actor_id, &request.employee_id) {
            return Err(EngineError::Unauthorized {
                actor_id: actor_id.to_string(),
                employee_id: request.employee_id.clone(),
            });
        }

        let catalog = self.leave_type(&request.leave_type)?.clone();
        let mut balance =
            self.materialized_balance(&request.employee_id, &catalog, key.2, request.range.from);
        self.leave.reverse(&mut request, &mut balance)?;
        self.store.put_balance(balance.clone());
        self.store.put_leave_request(request.clone());
        self.mark_leave_days(&request, false).await?;

        info!(
            %request_id,
            employee_id = %request.employee_id,
            actor_id,
            "leave approval reversed"
        );
        Ok(balance)
    }

    /// The employee's balance for every catalog leave type, with accrual
    /// computed as of the given date. Balances never touched by a
    /// request are synthesized, not persisted.
    pub fn balance_snapshot(
        &self,
        employee_id: &str,
        year: i32,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<LeaveBalance>> {
        let employee = self.store.active_employee(employee_id)?;
        let mut balances: Vec<LeaveBalance> = self
            .leave_types
            .values()
            .map(|lt| self.materialized_balance(&employee.id, lt, year, as_of))
            .collect();
        balances.sort_by(|a, b| a.leave_type.cmp(&b.leave_type));
        Ok(balances)
    }

    /// Summarizes one employee's month from recorded attendance days and
    /// materialized balances.
    pub fn monthly_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlySummary> {
        self.store.active_employee(employee_id)?;
        let days = self.store.attendance_days_in_month(employee_id, year, month);
        let balances = self.store.balances_for(employee_id, year);
        Ok(self
            .reports
            .monthly_summary(employee_id, year, month, &days, balances))
    }

    /// The attendance day for (employee, date) as the engine sees it:
    /// the stored record, or a synthesized one reflecting leave and
    /// shift expectations when no event was recorded.
    pub fn day_snapshot(&self, employee_id: &str, date: NaiveDate) -> EngineResult<AttendanceDay> {
        let employee = self.store.active_employee(employee_id)?;
        if let Some(day) = self.store.attendance_day(&employee.id, date) {
            return Ok(day);
        }

        let on_leave = self.on_approved_leave(&employee, date);
        let window = self.shifts.resolve(&employee, date, None, on_leave)?;
        let mut day = AttendanceDay::new(&employee.id, date);
        self.state_machine
            .set_leave_overlay(&mut day, on_leave, window.as_ref());
        Ok(day)
    }

    /// True when an applied leave approval covers the date as a leave
    /// day. Weekends and holidays inside an approved range are off days,
    /// not leave.
    fn on_approved_leave(&self, employee: &Employee, date: NaiveDate) -> bool {
        self.store.approved_leave_on(&employee.id, date)
            && self
                .leave
                .is_business_day(employee, date, self.calendar.as_ref())
    }

    /// Runs face matching and geofence validation concurrently under the
    /// configured timeout.
    async fn verify(
        &self,
        employee: &Employee,
        probe: &Embedding,
        lat: f64,
        lon: f64,
    ) -> EngineResult<(MatchDecision, GeoDecision)> {
        let claimed = self.store.enrollment(&employee.id);
        let rivals = self.store.rival_enrollments(&employee.id);
        let rival_refs: Vec<&FaceEnrollment> = rivals.iter().collect();

        let timeout = Duration::from_millis(self.settings.verification_timeout_ms);
        let (face, geo) = tokio::time::timeout(timeout, async {
            tokio::join!(
                async { self.face.match_probe(&claimed, &rival_refs, probe) },
                async { self.geofence.validate(&employee.site_id, lat, lon) },
            )
        })
        .await
        .map_err(|_| EngineError::VerificationTimeout {
            timeout_ms: self.settings.verification_timeout_ms,
        })?;

        Ok((face?, geo?))
    }

    /// Sets or clears the on-leave overlay on every business day the
    /// request covers.
    ///
    /// Callers hold the balance lock; day locks are taken one at a time
    /// underneath it, never the other way around.
    async fn mark_leave_days(&self, request: &LeaveRequest, on_leave: bool) -> EngineResult<()> {
        let employee = self.store.active_employee(&request.employee_id)?;
        for date in request.range.iter_days() {
            if !self
                .leave
                .is_business_day(&employee, date, self.calendar.as_ref())
            {
                continue;
            }
            let _guard = self.day_locks.lock((employee.id.clone(), date)).await;
            let mut day = self
                .store
                .attendance_day(&employee.id, date)
                .unwrap_or_else(|| AttendanceDay::new(&employee.id, date));
            let window = if on_leave {
                None
            } else {
                self.shifts.resolve(&employee, date, None, false)?
            };
            self.state_machine
                .set_leave_overlay(&mut day, on_leave, window.as_ref());
            self.store.put_attendance_day(day);
        }
        Ok(())
    }

    /// The stored balance for the key, with accrual advanced to `as_of`,
    /// or a fresh opening balance when none was materialized yet.
    fn materialized_balance(
        &self,
        employee_id: &str,
        catalog: &LeaveType,
        year: i32,
        as_of: NaiveDate,
    ) -> LeaveBalance {
        let key = (employee_id.to_string(), catalog.code.clone(), year);
        match self.store.balance(&key) {
            Some(mut balance) => {
                // Accrual only ever advances.
                balance.accrued_to_date = balance.accrued_to_date.max(catalog.accrued_to_date(as_of));
                balance
            }
            None => opening_balance(employee_id, catalog, year, as_of, Decimal::ZERO),
        }
    }

    fn leave_type(&self, code: &str) -> EngineResult<&LeaveType> {
        self.leave_types
            .get(code)
            .ok_or_else(|| EngineError::UnknownLeaveType {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use crate::scheduling::StaticHolidayCalendar;
    use chrono::Weekday;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee(id: &str, manager_id: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            shift_template: "general".to_string(),
            site_id: "hq".to_string(),
            manager_id: manager_id.map(str::to_string),
            weekly_off: vec![Weekday::Sat, Weekday::Sun],
            active: true,
        }
    }

    fn embedding() -> Embedding {
        let mut values = vec![0.0f32; 512];
        values[0] = 1.0;
        Embedding::new(values)
    }

    fn engine_with(employees: Vec<Employee>) -> AttendanceEngine {
        let config = ConfigLoader::load("./config/default").expect("default config should load");
        let store = Arc::new(RecordStore::new());
        for employee in employees {
            store.put_employee(employee);
        }
        AttendanceEngine::with_manager_chain(
            &config,
            store,
            Arc::new(StaticHolidayCalendar::default()),
        )
    }

    #[test]
    fn test_manager_chain_walks_upward() {
        let store = Arc::new(RecordStore::new());
        store.put_employee(employee("emp_001", Some("emp_100")));
        store.put_employee(employee("emp_100", Some("emp_200")));
        store.put_employee(employee("emp_200", None));
        let hierarchy = ManagerChainHierarchy::new(store);

        assert!(hierarchy.has_authority("emp_100", "emp_001"));
        assert!(hierarchy.has_authority("emp_200", "emp_001"));
        assert!(!hierarchy.has_authority("emp_001", "emp_100"));
        assert!(!hierarchy.has_authority("emp_001", "emp_001"));
    }

    #[test]
    fn test_manager_chain_cycle_terminates() {
        let store = Arc::new(RecordStore::new());
        store.put_employee(employee("emp_001", Some("emp_002")));
        store.put_employee(employee("emp_002", Some("emp_001")));
        let hierarchy = ManagerChainHierarchy::new(store);

        assert!(!hierarchy.has_authority("emp_999", "emp_001"));
        assert!(hierarchy.has_authority("emp_002", "emp_001"));
    }

    #[tokio::test]
    async fn test_clock_in_and_out_happy_path() {
        let engine = engine_with(vec![employee("emp_001", None)]);
        engine.enroll_faces("emp_001", vec![embedding()]).unwrap();

        // Monday at the hq site center, within the grace period.
        let date = make_date("2026-03-02");
        let day = engine
            .clock_in(
                "emp_001",
                date.and_hms_opt(9, 5, 0).unwrap(),
                &embedding(),
                19.0760,
                72.8777,
                None,
            )
            .await
            .unwrap();
        assert_eq!(day.status, AttendanceStatus::Present);

        let day = engine
            .clock_out(
                "emp_001",
                date.and_hms_opt(17, 30, 0).unwrap(),
                &embedding(),
                19.0760,
                72.8777,
                None,
            )
            .await
            .unwrap();
        assert_eq!(day.status, AttendanceStatus::Present);
        assert!(day.clock_out.is_some());
    }

    #[tokio::test]
    async fn test_clock_in_without_enrollment_fails() {
        let engine = engine_with(vec![employee("emp_001", None)]);
        let result = engine
            .clock_in(
                "emp_001",
                make_date("2026-03-02").and_hms_opt(9, 0, 0).unwrap(),
                &embedding(),
                19.0760,
                72.8777,
                None,
            )
            .await;
        assert!(matches!(result, Err(EngineError::NotEnrolled { .. })));
    }

    #[test]
    fn test_day_snapshot_without_events_is_absent() {
        let engine = engine_with(vec![employee("emp_001", None)]);
        let day = engine
            .day_snapshot("emp_001", make_date("2026-03-02"))
            .unwrap();
        assert_eq!(day.status, AttendanceStatus::Absent);
        assert!(day.clock_in.is_none());
    }
}
