//! Configuration for the attendance engine.
//!
//! Reference data (leave-type catalog, shift templates, geofence sites)
//! and engine policy (thresholds, timeouts, flags) are loaded from YAML
//! files by the [`ConfigLoader`].

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceThresholds, EngineSettings, FaceSettings, LeaveTypesConfig, RegularizationPolicy,
    ShiftsConfig, SitesConfig,
};
