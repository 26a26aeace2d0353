//! Movement speed profile shared by the motion engine and the spoofer.
//!
//! The set of variants is closed: applications pick one of three travel
//! modes and the engine derives a fixed speed from it.

use std::str::FromStr;

use crate::CoreError;

/// How the simulated position travels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MoveType {
    /// On foot, 5 km/h.
    #[default]
    Walk,
    /// Bicycle, 15 km/h.
    Cycle,
    /// Car, 40 km/h.
    Drive,
}

/// Directions transport type matching a [`MoveType`].
///
/// Routing front-ends use this to request directions that fit the chosen
/// speed profile; cycling has no dedicated variant and falls back to walking.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TransportType {
    Automobile,
    Walking,
}

impl MoveType {
    /// Every variant, in index order.
    pub const ALL: [MoveType; 3] = [MoveType::Walk, MoveType::Cycle, MoveType::Drive];

    /// Speed in metres per second.
    #[inline]
    pub fn speed(self) -> f64 {
        match self {
            MoveType::Walk  => 1.39,
            MoveType::Cycle => 4.167,
            MoveType::Drive => 11.112,
        }
    }

    /// Stable numeric index (walk = 0, cycle = 1, drive = 2).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn transport_type(self) -> TransportType {
        match self {
            MoveType::Drive => TransportType::Automobile,
            MoveType::Walk | MoveType::Cycle => TransportType::Walking,
        }
    }

    /// Human-readable label, also accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Walk  => "walk",
            MoveType::Cycle => "cycle",
            MoveType::Drive => "drive",
        }
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownMoveType(s.to_string()))
    }
}
