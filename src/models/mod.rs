//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod enrollment;
mod leave;
mod regularization;
mod shift;
mod site;

pub use attendance::{AttendanceDay, AttendanceStatus, ClockState};
pub use employee::Employee;
pub use enrollment::{Embedding, FaceEnrollment};
pub use leave::{AccrualRule, DateRange, LeaveBalance, LeaveRequest, LeaveType};
pub use regularization::{DecisionOutcome, RegularizationRequest, RequestState};
pub use shift::{ShiftTemplate, ShiftWindow};
pub use site::GeofenceSite;
