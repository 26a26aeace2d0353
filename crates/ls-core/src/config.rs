//! Motion timing and jitter configuration.
//!
//! # Design
//!
//! Two cadences drive the auto-update loop:
//!
//! - **Continuous movement** (auto and navigation modes) ticks at a fixed
//!   `auto_update_interval`, 250 ms by default.  Slow device writes stretch
//!   the effective interval; the spoofer compensates by measuring elapsed
//!   time between ticks.
//! - **Standing still** (manual mode) re-reports the last fix at irregular
//!   intervals drawn from `gps_uncertainty_interval_secs`, each time offset by
//!   a random distance and heading.  This mimics the wander of a real GPS
//!   receiver that is not moving.
//!
//! Typically left at the defaults; tests shrink the intervals so auto-update
//! loops finish in milliseconds.

use std::ops::Range;
use std::time::Duration;

use crate::{CoreError, CoreResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionProfile {
    /// Baseline tick interval for auto and navigation modes.
    pub auto_update_interval: Duration,

    /// Range (seconds) for the next re-report while standing still.
    pub gps_uncertainty_interval_secs: Range<f64>,

    /// Range (metres) of the jitter offset from the last intentional fix.
    pub gps_uncertainty_distance_m: Range<f64>,

    /// Range (degrees) of the jitter direction.
    pub gps_uncertainty_heading_deg: Range<f64>,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            auto_update_interval:          Duration::from_millis(250),
            gps_uncertainty_interval_secs: 5.0..15.0,
            gps_uncertainty_distance_m:    5.0..10.0,
            gps_uncertainty_heading_deg:   0.0..360.0,
        }
    }
}

impl MotionProfile {
    /// Reject empty, negative or non-finite ranges and a zero tick interval.
    pub fn validate(&self) -> CoreResult<()> {
        check_range("gps uncertainty interval", &self.gps_uncertainty_interval_secs)?;
        check_range("gps uncertainty distance", &self.gps_uncertainty_distance_m)?;
        check_range("gps uncertainty heading", &self.gps_uncertainty_heading_deg)?;
        if self.auto_update_interval.is_zero() {
            return Err(CoreError::InvalidRange {
                what:  "auto update interval",
                start: 0.0,
                end:   0.0,
            });
        }
        Ok(())
    }
}

/// Validate a sampling range: finite, non-negative start, `start < end`.
pub fn check_range(what: &'static str, range: &Range<f64>) -> CoreResult<()> {
    let ok = range.start.is_finite()
        && range.end.is_finite()
        && range.start >= 0.0
        && range.start < range.end;
    if ok {
        Ok(())
    } else {
        Err(CoreError::InvalidRange { what, start: range.start, end: range.end })
    }
}
