//! Attendance verification and workforce-leave engine.
//!
//! This crate verifies clock events (face matching plus geofence
//! validation), derives attendance status against shift expectations,
//! routes correction and leave requests through approval workflows, and
//! keeps leave balances consistent under concurrent operations.

#![warn(missing_docs)]

pub mod attendance;
pub mod config;
pub mod engine;
pub mod error;
pub mod leave;
pub mod models;
pub mod report;
pub mod scheduling;
pub mod store;
pub mod sync;
pub mod verification;
