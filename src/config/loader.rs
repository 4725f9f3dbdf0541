//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and reference data from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};
use crate::models::{GeofenceSite, LeaveType, ShiftTemplate};

use super::types::{EngineSettings, LeaveTypesConfig, ShiftsConfig, SitesConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query leave types, shift templates, geofence
/// sites, and engine policy settings.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml       # thresholds, timeouts, policy flags
/// ├── leave_types.yaml  # leave-type catalog
/// ├── shifts.yaml       # shift templates
/// └── sites.yaml        # geofence sites
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let casual = loader.leave_type("casual").unwrap();
/// println!("Entitlement: {} days", casual.annual_entitlement);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    leave_types: HashMap<String, LeaveType>,
    shifts: HashMap<String, ShiftTemplate>,
    sites: HashMap<String, GeofenceSite>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains
    /// invalid YAML, or lacks a required field.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let leave_types_config = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;
        let shifts_config = Self::load_yaml::<ShiftsConfig>(&path.join("shifts.yaml"))?;
        let sites_config = Self::load_yaml::<SitesConfig>(&path.join("sites.yaml"))?;

        let leave_types = leave_types_config
            .leave_types
            .into_iter()
            .map(|lt| (lt.code.clone(), lt))
            .collect();
        let shifts = shifts_config
            .shifts
            .into_iter()
            .map(|s| (s.code.clone(), s))
            .collect();
        let sites = sites_config
            .sites
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        Ok(ConfigLoader {
            settings,
            leave_types,
            shifts,
            sites,
        })
    }

    /// Returns the engine policy settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Looks up a leave type by code.
    pub fn leave_type(&self, code: &str) -> EngineResult<&LeaveType> {
        self.leave_types
            .get(code)
            .ok_or_else(|| EngineError::UnknownLeaveType {
                code: code.to_string(),
            })
    }

    /// Returns every catalog leave type.
    pub fn leave_types(&self) -> impl Iterator<Item = &LeaveType> {
        self.leave_types.values()
    }

    /// Looks up a shift template by code.
    pub fn shift_template(&self, code: &str) -> Option<&ShiftTemplate> {
        self.shifts.get(code)
    }

    /// Returns every configured shift template.
    pub fn shift_templates(&self) -> impl Iterator<Item = &ShiftTemplate> {
        self.shifts.values()
    }

    /// Returns every registered geofence site.
    pub fn sites(&self) -> impl Iterator<Item = &GeofenceSite> {
        self.sites.values()
    }

    /// Looks up a geofence site by id.
    pub fn site(&self, site_id: &str) -> EngineResult<&GeofenceSite> {
        self.sites
            .get(site_id)
            .ok_or_else(|| EngineError::UnknownSite {
                site_id: site_id.to_string(),
            })
    }

    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|err| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccrualRule;
    use chrono::Weekday;
    use rust_decimal::Decimal;

    fn load_default() -> ConfigLoader {
        ConfigLoader::load("./config/default").expect("default config should load")
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let result = ConfigLoader::load("./config/does_not_exist");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_default_engine_settings() {
        let loader = load_default();
        let settings = loader.settings();
        assert_eq!(settings.face.match_threshold, 0.6);
        assert!(settings.face.match_threshold < 1.0);
        assert_eq!(settings.attendance.half_day_hours, Decimal::new(4, 0));
        assert!(settings.verification_timeout_ms > 0);
    }

    #[test]
    fn test_default_leave_types_catalog() {
        let loader = load_default();
        let casual = loader.leave_type("casual").unwrap();
        assert_eq!(casual.accrual, AccrualRule::Monthly);
        let sick = loader.leave_type("sick").unwrap();
        assert_eq!(sick.accrual, AccrualRule::UpFront);
    }

    #[test]
    fn test_unknown_leave_type_is_rejected() {
        let loader = load_default();
        assert!(matches!(
            loader.leave_type("sabbatical"),
            Err(EngineError::UnknownLeaveType { .. })
        ));
    }

    #[test]
    fn test_default_shift_templates() {
        let loader = load_default();
        let general = loader.shift_template("general").unwrap();
        assert_eq!(general.grace_minutes, 10);
        assert!(general.applies_on(Weekday::Mon));
        assert!(!general.applies_on(Weekday::Sun));
    }

    #[test]
    fn test_default_sites() {
        let loader = load_default();
        let site = loader.site("hq").unwrap();
        assert!(site.radius_meters > 0.0);
        assert!(matches!(
            loader.site("moonbase"),
            Err(EngineError::UnknownSite { .. })
        ));
    }
}
