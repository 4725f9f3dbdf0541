//! Identity and location verification for clock events.
//!
//! Both checks are pure decision logic: face matching against enrolled
//! embeddings and great-circle geofence validation. Neither mutates any
//! state, and both must pass before the attendance state machine accepts
//! a clock-in.

mod face;
mod geofence;

pub use face::{FaceMatcher, MatchDecision, MatchReason, cosine_similarity};
pub use geofence::{GeoDecision, GeofenceValidator, haversine_distance_meters};
