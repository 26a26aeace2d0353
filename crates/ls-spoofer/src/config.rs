//! Spoofer start-up configuration.

use std::ops::Range;

use ls_core::config::check_range;
use ls_core::{CoreError, MotionProfile, MoveType};

/// Initial movement settings and tuning for one spoofer.
///
/// Typically loaded from a JSON file by the application (with the `serde`
/// feature) and passed to [`SpooferBuilder::config`][crate::SpooferBuilder::config].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpooferConfig {
    /// Tick cadence and GPS jitter ranges.
    pub profile: MotionProfile,

    /// Initial move type.
    pub move_type: MoveType,

    /// Initial speed in m/s.  `None` uses `move_type.speed()`.
    pub speed: Option<f64>,

    /// Initial heading in degrees (0 = north).
    pub heading: f64,

    /// Multiplicative speed variance, e.g. `0.8..1.2`.  `None` disables it.
    pub movement_speed_variance: Option<Range<f64>>,

    /// Seed for jitter and variance.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SpooferConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.profile.validate()?;
        if let Some(variance) = &self.movement_speed_variance {
            check_range("movement speed variance", variance)?;
        }
        match self.speed {
            Some(speed) if !(speed.is_finite() && speed >= 0.0) => {
                Err(CoreError::InvalidRange { what: "speed", start: speed, end: speed })
            }
            _ => Ok(()),
        }
    }

    /// The speed the spoofer starts with.
    pub fn initial_speed(&self) -> f64 {
        self.speed.unwrap_or_else(|| self.move_type.speed())
    }
}
