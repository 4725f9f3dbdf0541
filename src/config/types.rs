//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{GeofenceSite, LeaveType, ShiftTemplate};

/// Face-matching thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceSettings {
    /// Required dimensionality of every embedding the engine accepts.
    pub embedding_dim: usize,
    /// Minimum cosine similarity for a probe to match the claimed
    /// identity.
    pub match_threshold: f32,
    /// Required margin between the best similarity to the claimed
    /// identity and the best similarity to any other enrolled identity.
    pub collision_margin: f32,
    /// Whether to cross-check the probe against other enrolled
    /// identities at all.
    #[serde(default = "default_cross_check")]
    pub cross_check: bool,
    /// Minimum pairwise similarity across an enrollment capture set.
    pub consistency_threshold: f32,
}

fn default_cross_check() -> bool {
    true
}

/// Worked-duration thresholds for status finalization.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceThresholds {
    /// Worked hours at or above which a closed day counts as full.
    pub full_day_hours: Decimal,
    /// Worked hours below which a closed day is a half day.
    pub half_day_hours: Decimal,
}

/// Policy switches for the regularization workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct RegularizationPolicy {
    /// Whether a regularization request may create an attendance day
    /// ex nihilo for a date with no recorded events.
    pub allow_retroactive_creation: bool,
}

/// Top-level engine settings file (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Face-matching thresholds.
    pub face: FaceSettings,
    /// Worked-duration thresholds.
    pub attendance: AttendanceThresholds,
    /// Regularization policy switches.
    pub regularization: RegularizationPolicy,
    /// Upper bound on face + geofence verification, in milliseconds.
    pub verification_timeout_ms: u64,
}

/// Leave-type catalog file structure (`leave_types.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// The catalog entries.
    pub leave_types: Vec<LeaveType>,
}

/// Shift template file structure (`shifts.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// The shift templates employees can be assigned.
    pub shifts: Vec<ShiftTemplate>,
}

/// Geofence site file structure (`sites.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SitesConfig {
    /// The registered geofence sites.
    pub sites: Vec<GeofenceSite>,
}
