//! Geofence site model.

use serde::{Deserialize, Serialize};

/// A circular geofence boundary defining a permitted clock-in location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSite {
    /// Unique identifier for the site.
    pub id: String,
    /// Human-readable label (e.g. "HQ Block C").
    pub label: String,
    /// Latitude of the site center in decimal degrees.
    pub lat: f64,
    /// Longitude of the site center in decimal degrees.
    pub lon: f64,
    /// Permitted radius around the center, in meters.
    pub radius_meters: f64,
}
