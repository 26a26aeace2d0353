//! `ls-core`: foundational types for the location spoofer.
//!
//! This crate is a dependency of every other `ls-*` crate.  It has no `ls-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geo`]         | `Coordinate`, destination / distance / heading        |
//! | [`move_type`]   | `MoveType` speed profile, `TransportType`             |
//! | [`rng`]         | `MotionRng` (seedable jitter source)                  |
//! | [`config`]      | `MotionProfile` timing and jitter ranges              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod move_type;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MotionProfile;
pub use error::{CoreError, CoreResult};
pub use geo::{COORDINATE_EPSILON_M, Coordinate, EARTH_RADIUS_M};
pub use move_type::{MoveType, TransportType};
pub use rng::MotionRng;
