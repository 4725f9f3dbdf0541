//! Employee model.
//!
//! This module defines the Employee struct referenced by attendance,
//! regularization, and leave records throughout the engine.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Represents a worker subject to attendance verification.
///
/// Employees are created at onboarding and never physically deleted;
/// deactivation flips the `active` flag so historical attendance stays
/// intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Code of the shift template assigned to this employee.
    pub shift_template: String,
    /// The geofence site the employee is permitted to clock in from.
    pub site_id: String,
    /// The employee's reporting manager, if any. Used by the in-crate
    /// reporting-hierarchy authority check.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// Weekly off days (no shift expected on these weekdays).
    #[serde(default)]
    pub weekly_off: Vec<Weekday>,
    /// Whether the employee is active. Soft-deactivated employees keep
    /// their history but cannot produce new clock events.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the given weekday is one of the employee's weekly
    /// off days.
    pub fn is_weekly_off(&self, weekday: Weekday) -> bool {
        self.weekly_off.contains(&weekday)
    }
}
