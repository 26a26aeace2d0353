//! The move-state machine: how the next position is derived each tick.

use std::time::Duration;

use ls_core::{Coordinate, MotionProfile, MotionRng};

use crate::NavigationRoute;

/// Movement mode of the spoofer.
///
/// - **Manual**: the position only changes when the caller steps or sets it.
///   While auto-updating, the engine re-reports the last fix with a small
///   random offset to mimic GPS wander.
/// - **Auto**: continuous movement along the current heading at the current
///   speed.
/// - **Navigating**: follow a route waypoint by waypoint, snapping onto each
///   waypoint instead of overshooting it.
///
/// The route is owned by the variant.  Advancing it replaces the whole
/// `MoveState` value, so a clone taken earlier never observes the cursor
/// move underneath it.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveState {
    #[default]
    Manual,
    Auto,
    Navigating(NavigationRoute),
}

impl MoveState {
    /// Variant name without the associated route, for logs and UI labels.
    pub fn name(&self) -> &'static str {
        match self {
            MoveState::Manual        => "manual",
            MoveState::Auto          => "auto",
            MoveState::Navigating(_) => "navigation",
        }
    }

    #[inline]
    pub fn is_manual(&self) -> bool {
        matches!(self, MoveState::Manual)
    }

    /// The route being followed, if navigating.
    pub fn route(&self) -> Option<&NavigationRoute> {
        match self {
            MoveState::Navigating(route) => Some(route),
            _ => None,
        }
    }

    /// Whether auto-update needs an existing position to start from.
    ///
    /// Navigation can bootstrap from nothing: its first tick targets the
    /// route's start waypoint.
    pub fn requires_initial_location_for_auto_update(&self) -> bool {
        !matches!(self, MoveState::Navigating(_))
    }

    /// `true` while [`next_location`][Self::next_location] must be given a
    /// previous position: navigation that has left its start waypoint and
    /// still has waypoints ahead.
    pub fn needs_previous_location(&self) -> bool {
        match self {
            MoveState::Navigating(route) => !route.is_at_start() && !route.is_finished(),
            MoveState::Manual | MoveState::Auto => false,
        }
    }

    /// The delay before the next auto-update tick.
    ///
    /// Manual mode draws a fresh interval every call so stationary re-reports
    /// arrive irregularly.  The other modes keep `previous` if there is one and
    /// otherwise fall back to the profile's baseline interval.
    pub fn next_auto_update_interval(
        &self,
        previous: Option<Duration>,
        profile:  &MotionProfile,
        rng:      &mut MotionRng,
    ) -> Duration {
        match self {
            MoveState::Manual => {
                let secs = rng.sample(&profile.gps_uncertainty_interval_secs);
                Duration::from_secs_f64(secs.max(0.0))
            }
            MoveState::Auto | MoveState::Navigating(_) => {
                previous.unwrap_or(profile.auto_update_interval)
            }
        }
    }

    /// Compute the next position to report.
    ///
    /// Returns `None` when there is nowhere to go: no previous position in
    /// manual/auto mode, or an exhausted route.  In navigation mode the route
    /// cursor may advance, which replaces `self` with the advanced state.
    ///
    /// # Panics
    ///
    /// Panics if `previous` is `None` while
    /// [`needs_previous_location`][Self::needs_previous_location] holds.
    /// Callers check that first.
    pub fn next_location(
        &mut self,
        distance:       f64,
        heading:        f64,
        previous:       Option<Coordinate>,
        is_auto_update: bool,
        profile:        &MotionProfile,
        rng:            &mut MotionRng,
    ) -> Option<Coordinate> {
        match self {
            MoveState::Manual if is_auto_update => {
                let distance = rng.sample(&profile.gps_uncertainty_distance_m);
                let heading = rng.sample(&profile.gps_uncertainty_heading_deg);
                previous.map(|p| p.destination(distance, heading))
            }
            MoveState::Manual | MoveState::Auto => {
                previous.map(|p| p.destination(distance, heading))
            }
            MoveState::Navigating(route) => {
                let mut route = route.clone();
                let next = navigate(&mut route, distance, previous);
                *self = MoveState::Navigating(route);
                next
            }
        }
    }
}

/// One navigation step over a private copy of the route.
fn navigate(
    route:    &mut NavigationRoute,
    distance: f64,
    previous: Option<Coordinate>,
) -> Option<Coordinate> {
    if route.is_at_start() {
        let start = route.current();
        // Travel to the first waypoint before the route proper begins.
        match (previous, start) {
            (Some(p), Some(s)) if p == s => {
                route.advance();
            }
            _ => return start,
        }
    }

    let waypoint = route.current()?;

    let Some(previous) = previous else {
        panic!("navigation is active past the start waypoint but there is no previous location");
    };

    if previous == waypoint {
        route.advance();
        return Some(waypoint);
    }

    let bearing = previous.heading_to(waypoint);
    let next = previous.destination(distance, bearing);

    if next.distance_m(waypoint) <= distance {
        route.advance();
        return Some(waypoint);
    }

    Some(next)
}

impl PartialEq for MoveState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MoveState::Manual, MoveState::Manual) => true,
            (MoveState::Auto, MoveState::Auto) => true,
            (MoveState::Navigating(a), MoveState::Navigating(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for MoveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
