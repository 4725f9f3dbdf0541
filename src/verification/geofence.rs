//! Geofence validation.
//!
//! Checks a reported coordinate against the permitted work-site boundary
//! using great-circle distance. The boundary is closed: a point exactly
//! on the radius counts as inside.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::GeofenceSite;

/// Mean Earth radius in meters, used by the haversine formula.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// The outcome of a geofence check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoDecision {
    /// Whether the reported point lies within the permitted boundary.
    pub inside: bool,
    /// Great-circle distance from the reported point to the site center.
    pub distance_meters: f64,
}

/// Great-circle distance between two coordinates, in meters.
///
/// # Examples
///
/// ```
/// use attendance_engine::verification::haversine_distance_meters;
///
/// let d = haversine_distance_meters(19.0760, 72.8777, 19.0760, 72.8777);
/// assert_eq!(d, 0.0);
/// ```
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Validates reported coordinates against registered geofence sites.
#[derive(Debug, Clone)]
pub struct GeofenceValidator {
    sites: HashMap<String, GeofenceSite>,
}

impl GeofenceValidator {
    /// Builds a validator over the sites registered in configuration.
    pub fn new(config: &ConfigLoader) -> Self {
        GeofenceValidator {
            sites: config
                .sites()
                .map(|s| (s.id.clone(), s.clone()))
                .collect(),
        }
    }

    /// Builds a validator over an explicit site list.
    pub fn from_sites(sites: Vec<GeofenceSite>) -> Self {
        GeofenceValidator {
            sites: sites.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// Checks a reported coordinate against a site's boundary.
    ///
    /// Fails with `UnknownSite` when `site_id` has no registered
    /// geofence. A distance exactly equal to the radius is inside.
    pub fn validate(&self, site_id: &str, lat: f64, lon: f64) -> EngineResult<GeoDecision> {
        let site = self
            .sites
            .get(site_id)
            .ok_or_else(|| EngineError::UnknownSite {
                site_id: site_id.to_string(),
            })?;

        let distance_meters = haversine_distance_meters(lat, lon, site.lat, site.lon);
        Ok(GeoDecision {
            inside: distance_meters <= site.radius_meters,
            distance_meters,
        })
    }

    /// Returns the registered radius of a site.
    pub fn site_radius(&self, site_id: &str) -> EngineResult<f64> {
        self.sites
            .get(site_id)
            .map(|s| s.radius_meters)
            .ok_or_else(|| EngineError::UnknownSite {
                site_id: site_id.to_string(),
            })
    }
}
