//! The per-employee, per-day attendance record and its mutations.
//!
//! This module owns the clock-event state machine, the pure status
//! derivation it relies on, and the regularization workflow that
//! supersedes recorded times through approved corrections.

mod regularization;
mod state_machine;
mod status;

pub use regularization::RegularizationWorkflow;
pub use state_machine::AttendanceStateMachine;
pub use status::derive_status;
