//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection the engine can produce. Each variant belongs to
//! exactly one [`ErrorClass`], so callers can distinguish "retry with a
//! fresh capture" from "resubmitting will not help".

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the attendance engine.
///
/// All engine operations return this error type. No variant is fatal to
/// the process; every failure is scoped to the single request that
/// triggered it.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::UnknownSite { site_id: "hq_block_c".to_string() };
/// assert_eq!(error.to_string(), "Unknown geofence site: hq_block_c");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Employee id has no record.
    #[error("Unknown employee: {employee_id}")]
    UnknownEmployee {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// Leave type code has no catalog entry.
    #[error("Unknown leave type: {code}")]
    UnknownLeaveType {
        /// The leave type code that was not found.
        code: String,
    },

    /// Shift template code has no definition.
    #[error("Unknown shift template: {code}")]
    UnknownShiftTemplate {
        /// The shift template code that was not found.
        code: String,
    },

    /// Site id has no registered geofence.
    #[error("Unknown geofence site: {site_id}")]
    UnknownSite {
        /// The site id that was not found.
        site_id: String,
    },

    /// The claimed employee has no stored face enrollment.
    #[error("Employee {employee_id} has no face enrollment")]
    NotEnrolled {
        /// The employee whose enrollment set is empty.
        employee_id: String,
    },

    /// A probe or enrollment embedding has the wrong dimensionality.
    #[error("Malformed embedding: expected {expected} dimensions, got {actual}")]
    EmbeddingMalformed {
        /// The dimensionality required by the engine configuration.
        expected: usize,
        /// The dimensionality of the offending vector.
        actual: usize,
    },

    /// An enrollment capture set failed the pairwise consistency check.
    #[error("Enrollment captures are inconsistent (minimum pairwise similarity {min_similarity})")]
    EnrollmentInconsistent {
        /// The lowest pairwise similarity observed across the capture set.
        min_similarity: f32,
    },

    /// A date range has its end before its start.
    #[error("Invalid date range: {from} to {to}")]
    InvalidDateRange {
        /// The start of the range.
        from: NaiveDate,
        /// The end of the range.
        to: NaiveDate,
    },

    /// The face probe did not match the claimed identity.
    #[error("Face verification rejected (confidence {confidence:.3})")]
    FaceRejected {
        /// The best similarity against the claimed identity's enrollment.
        confidence: f32,
    },

    /// The reported coordinate falls outside the permitted site boundary.
    #[error(
        "Outside geofence: {distance_meters:.1}m from site center, allowed radius {radius_meters:.1}m"
    )]
    OutsideGeofence {
        /// Great-circle distance from the reported point to the site center.
        distance_meters: f64,
        /// The site's permitted radius.
        radius_meters: f64,
    },

    /// Verification did not complete within the configured bound.
    #[error("Verification timed out after {timeout_ms}ms")]
    VerificationTimeout {
        /// The configured verification timeout in milliseconds.
        timeout_ms: u64,
    },

    /// An open clock-in already exists for this employee and date.
    #[error("Duplicate clock-in for employee {employee_id} on {date}")]
    DuplicateClockIn {
        /// The employee attempting to clock in.
        employee_id: String,
        /// The date that already has a recorded clock-in.
        date: NaiveDate,
    },

    /// Clock-out was attempted without an open clock-in.
    #[error("No open clock-in for employee {employee_id} on {date}")]
    NoOpenClockIn {
        /// The employee attempting to clock out.
        employee_id: String,
        /// The date with no open clock-in.
        date: NaiveDate,
    },

    /// Clock-out timestamp is not strictly after the clock-in timestamp.
    #[error("Clock-out at {clock_out} is not after clock-in at {clock_in}")]
    ClockOutBeforeClockIn {
        /// The recorded clock-in timestamp.
        clock_in: chrono::NaiveDateTime,
        /// The rejected clock-out timestamp.
        clock_out: chrono::NaiveDateTime,
    },

    /// Regularization was requested for a date with no attendance record
    /// and retroactive creation is disabled by policy.
    #[error("No attendance day exists for employee {employee_id} on {date}")]
    NoAttendanceDay {
        /// The employee the request refers to.
        employee_id: String,
        /// The date with no attendance record.
        date: NaiveDate,
    },

    /// A pending or approved regularization already covers this date.
    #[error("Regularization already exists for employee {employee_id} on {date}")]
    DuplicateRegularization {
        /// The employee the request refers to.
        employee_id: String,
        /// The date already covered.
        date: NaiveDate,
    },

    /// The referenced request does not exist.
    #[error("Request not found: {request_id}")]
    RequestNotFound {
        /// The missing request id.
        request_id: Uuid,
    },

    /// The request has already reached a terminal state.
    #[error("Request {request_id} was already decided")]
    AlreadyDecided {
        /// The request that is no longer pending.
        request_id: Uuid,
    },

    /// The approver has no authority over the employee, or the actor is
    /// not permitted to perform this transition.
    #[error("Actor {actor_id} is not authorized to act on employee {employee_id}")]
    Unauthorized {
        /// The approver or actor attempting the transition.
        actor_id: String,
        /// The employee the request belongs to.
        employee_id: String,
    },

    /// The leave request overlaps an existing pending or approved request.
    #[error("Leave request overlaps existing leave from {from} to {to}")]
    OverlappingLeave {
        /// Start of the conflicting existing leave.
        from: NaiveDate,
        /// End of the conflicting existing leave.
        to: NaiveDate,
    },

    /// The leave balance cannot cover the requested days and no override
    /// was granted.
    #[error("Insufficient leave balance: requested {requested} days, {available} available")]
    InsufficientBalance {
        /// Business days requested.
        requested: rust_decimal::Decimal,
        /// Days currently available (accrued + carried over - consumed).
        available: rust_decimal::Decimal,
    },

    /// A balance operation referenced a request that is not approved.
    #[error("Request {request_id} is not approved")]
    NotApproved {
        /// The request that is not in the approved state.
        request_id: Uuid,
    },

    /// Reversal was attempted for a request that was never applied.
    #[error("Request {request_id} cannot be reversed in its current state")]
    NotReversible {
        /// The request that cannot be reversed.
        request_id: Uuid,
    },
}

/// Broad classification of engine errors.
///
/// Every [`EngineError`] belongs to exactly one class, matching the four
/// rejection kinds the engine distinguishes (plus configuration faults,
/// which only occur at load time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or unknown input; rejected before any state is touched.
    InputValidation,
    /// Face/geofence verification failed; the client may retry with a
    /// fresh capture.
    Verification,
    /// The request conflicts with recorded state; resubmitting the same
    /// request will not help.
    StateConflict,
    /// A policy check failed and no override was granted.
    PolicyViolation,
    /// Configuration could not be loaded.
    Config,
}

impl EngineError {
    /// Returns the classification of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorClass::Config
            }
            EngineError::UnknownEmployee { .. }
            | EngineError::UnknownLeaveType { .. }
            | EngineError::UnknownShiftTemplate { .. }
            | EngineError::UnknownSite { .. }
            | EngineError::NotEnrolled { .. }
            | EngineError::EmbeddingMalformed { .. }
            | EngineError::EnrollmentInconsistent { .. }
            | EngineError::InvalidDateRange { .. } => ErrorClass::InputValidation,
            EngineError::FaceRejected { .. }
            | EngineError::OutsideGeofence { .. }
            | EngineError::VerificationTimeout { .. } => ErrorClass::Verification,
            EngineError::DuplicateClockIn { .. }
            | EngineError::NoOpenClockIn { .. }
            | EngineError::ClockOutBeforeClockIn { .. }
            | EngineError::NoAttendanceDay { .. }
            | EngineError::DuplicateRegularization { .. }
            | EngineError::RequestNotFound { .. }
            | EngineError::AlreadyDecided { .. }
            | EngineError::OverlappingLeave { .. }
            | EngineError::NotApproved { .. }
            | EngineError::NotReversible { .. } => ErrorClass::StateConflict,
            EngineError::Unauthorized { .. } | EngineError::InsufficientBalance { .. } => {
                ErrorClass::PolicyViolation
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
