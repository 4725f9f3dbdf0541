//! The regularization workflow.
//!
//! Lets an employee request a correction to an attendance day and routes
//! it through an approver state machine:
//! `Pending -> {Approved, Rejected, Cancelled}`, all terminal. The
//! workflow never touches attendance records directly; on approval the
//! caller applies the proposed times through the attendance state
//! machine under the day's lock.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::config::RegularizationPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{DecisionOutcome, RegularizationRequest, RequestState};

/// Creates and transitions regularization requests.
#[derive(Debug, Clone)]
pub struct RegularizationWorkflow {
    policy: RegularizationPolicy,
}

impl RegularizationWorkflow {
    /// Creates a workflow with the given policy switches.
    pub fn new(policy: RegularizationPolicy) -> Self {
        RegularizationWorkflow { policy }
    }

    /// Creates a pending request for the given day.
    ///
    /// `day_exists` reports whether an AttendanceDay is already recorded
    /// for the date; when it is not, the request is only admitted if
    /// policy allows retroactive full-day creation.
    /// `duplicate_pending_or_approved` reports whether another request
    /// already covers the date.
    pub fn create(
        &self,
        employee_id: &str,
        date: NaiveDate,
        proposed_clock_in: Option<NaiveDateTime>,
        proposed_clock_out: Option<NaiveDateTime>,
        reason: impl Into<String>,
        day_exists: bool,
        duplicate_pending_or_approved: bool,
    ) -> EngineResult<RegularizationRequest> {
        if duplicate_pending_or_approved {
            return Err(EngineError::DuplicateRegularization {
                employee_id: employee_id.to_string(),
                date,
            });
        }

        if !day_exists && !self.policy.allow_retroactive_creation {
            return Err(EngineError::NoAttendanceDay {
                employee_id: employee_id.to_string(),
                date,
            });
        }

        if let (Some(clock_in), Some(clock_out)) = (proposed_clock_in, proposed_clock_out)
            && clock_out <= clock_in
        {
            return Err(EngineError::ClockOutBeforeClockIn {
                clock_in,
                clock_out,
            });
        }

        Ok(RegularizationRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            date,
            proposed_clock_in,
            proposed_clock_out,
            reason: reason.into(),
            state: RequestState::Pending,
            decided_by: None,
        })
    }

    /// Applies an approver's decision to a pending request.
    ///
    /// Returns true when the outcome was `Approve`, signaling the caller
    /// to apply the proposed times to the attendance day.
    ///
    /// # Errors
    ///
    /// - `AlreadyDecided` when the request is no longer pending
    /// - `Unauthorized` when the approver lacks authority over the
    ///   employee
    pub fn decide(
        &self,
        request: &mut RegularizationRequest,
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

    /// Cancels a pending request. Only its creator may cancel, and only
    /// while the request is pending.
    pub fn cancel(&self, request: &mut RegularizationRequest, actor_id: &str) -> EngineResult<()> {
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
}
