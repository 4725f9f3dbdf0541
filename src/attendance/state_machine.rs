//! The clock-event state machine.
//!
//! Transitions one [`AttendanceDay`] through
//! `NoEvent -> Open -> Closed`. Approved regularizations supersede the
//! recorded times and re-enter the recompute step, but never alter the
//! transition graph itself. Rejections are scoped to the single request;
//! existing state is never corrupted by a failed transition.

use chrono::NaiveDateTime;

use crate::config::AttendanceThresholds;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, ClockState, ShiftWindow};
use crate::verification::{GeoDecision, MatchDecision};

use super::status::derive_status;

/// Applies clock events and corrections to attendance days.
#[derive(Debug, Clone)]
pub struct AttendanceStateMachine {
    thresholds: AttendanceThresholds,
}

impl AttendanceStateMachine {
    /// Creates a state machine with the given duration thresholds.
    pub fn new(thresholds: AttendanceThresholds) -> Self {
        AttendanceStateMachine { thresholds }
    }

    /// Records a clock-in on the day.
    ///
    /// Both verification results must already be positive; rejections
    /// are reported to the caller, not retried (the device decides
    /// whether to re-capture and resubmit).
    ///
    /// # Errors
    ///
    /// - `FaceRejected` when the face decision was not accepted
    /// - `OutsideGeofence` when the reported point is outside the site
    /// - `DuplicateClockIn` when the day already has a clock-in
    pub fn clock_in(
        &self,
        day: &mut AttendanceDay,
        timestamp: NaiveDateTime,
        face: &MatchDecision,
        geo: &GeoDecision,
        site_radius: f64,
        window: Option<&ShiftWindow>,
    ) -> EngineResult<()> {
        if !face.accepted {
            return Err(EngineError::FaceRejected {
                confidence: face.confidence,
            });
        }
        if !geo.inside {
            return Err(EngineError::OutsideGeofence {
                distance_meters: geo.distance_meters,
                radius_meters: site_radius,
            });
        }
        if day.clock_in.is_some() {
            return Err(EngineError::DuplicateClockIn {
                employee_id: day.employee_id.clone(),
                date: day.date,
            });
        }

        day.clock_in = Some(timestamp);
        day.status = derive_status(day, window, &self.thresholds);
        Ok(())
    }

    /// Records a clock-out and finalizes the day's status.
    ///
    /// # Errors
    ///
    /// - `NoOpenClockIn` when the day is not in the `Open` state
    /// - `ClockOutBeforeClockIn` when ordering would be violated
    pub fn clock_out(
        &self,
        day: &mut AttendanceDay,
        timestamp: NaiveDateTime,
        window: Option<&ShiftWindow>,
    ) -> EngineResult<()> {
        let Some(clock_in) = day.clock_in.filter(|_| day.clock_state() == ClockState::Open)
        else {
            return Err(EngineError::NoOpenClockIn {
                employee_id: day.employee_id.clone(),
                date: day.date,
            });
        };
        if timestamp <= clock_in {
            return Err(EngineError::ClockOutBeforeClockIn {
                clock_in,
                clock_out: timestamp,
            });
        }

        day.clock_out = Some(timestamp);
        day.status = derive_status(day, window, &self.thresholds);
        Ok(())
    }

    /// Supersedes the recorded times with approved correction times.
    ///
    /// Called only by the regularization workflow once a request is
    /// approved. Marks the day regularized and recomputes its status.
    pub fn apply_correction(
        &self,
        day: &mut AttendanceDay,
        proposed_clock_in: Option<NaiveDateTime>,
        proposed_clock_out: Option<NaiveDateTime>,
        window: Option<&ShiftWindow>,
    ) -> EngineResult<()> {
        let clock_in = proposed_clock_in.or(day.clock_in);
        let clock_out = proposed_clock_out.or(day.clock_out);

        if let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out)
            && clock_out <= clock_in
        {
            return Err(EngineError::ClockOutBeforeClockIn {
                clock_in,
                clock_out,
            });
        }

        day.clock_in = clock_in;
        day.clock_out = clock_out;
        day.regularized = true;
        day.status = derive_status(day, window, &self.thresholds);
        Ok(())
    }

    /// Sets or clears the approved-leave overlay and recomputes status.
    pub fn set_leave_overlay(
        &self,
        day: &mut AttendanceDay,
        on_leave: bool,
        window: Option<&ShiftWindow>,
    ) {
        day.on_leave = on_leave;
        day.status = derive_status(day, window, &self.thresholds);
    }
}
