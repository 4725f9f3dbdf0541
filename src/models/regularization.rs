//! Regularization request model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state shared by regularization and leave requests.
///
/// `Pending` is the only non-terminal state; every terminal state is
/// immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Awaiting an approver's decision.
    Pending,
    /// Approved by an authorized approver. Terminal.
    Approved,
    /// Rejected by an authorized approver. Terminal.
    Rejected,
    /// Cancelled by its creator while pending, or reversed after
    /// approval (leave only). Terminal.
    Cancelled,
}

impl RequestState {
    /// Returns true if the state permits no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestState::Pending)
    }
}

/// The outcome an approver selects when deciding a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Accept the request.
    Approve,
    /// Decline the request.
    Reject,
}

/// An employee-initiated correction to a previously recorded or missing
/// attendance day.
///
/// Once approved, the proposed times supersede the recorded times on the
/// referenced [`AttendanceDay`](super::AttendanceDay) and its status is
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizationRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee whose attendance day is being corrected.
    pub employee_id: String,
    /// The date of the attendance day being corrected.
    pub date: NaiveDate,
    /// Proposed corrected clock-in time, if any.
    pub proposed_clock_in: Option<NaiveDateTime>,
    /// Proposed corrected clock-out time, if any.
    pub proposed_clock_out: Option<NaiveDateTime>,
    /// Free-text justification supplied by the employee.
    pub reason: String,
    /// Current lifecycle state.
    pub state: RequestState,
    /// The approver who decided the request, once decided.
    pub decided_by: Option<String>,
}
