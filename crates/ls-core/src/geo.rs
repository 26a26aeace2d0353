//! Geographic coordinate type and spherical-earth geometry.
//!
//! `Coordinate` uses `f64` latitude/longitude.  Movement steps are often only
//! a few metres long and are accumulated over thousands of ticks, so single
//! precision would drift visibly.
//!
//! All three operations treat the Earth as a sphere of radius
//! [`EARTH_RADIUS_M`].  That is accurate enough for simulated walking and
//! driving; nothing here claims survey-grade fidelity.

use std::f64::consts::PI;

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Two coordinates closer than this are considered the same point.
pub const COORDINATE_EPSILON_M: f64 = 0.0005;

/// A WGS-84 geographic coordinate in degrees.
///
/// Equality is approximate: `a == b` iff the great-circle distance between
/// them is at most [`COORDINATE_EPSILON_M`].  This absorbs floating-point
/// drift after repeated `destination` calls, which matters when the movement
/// engine checks whether a waypoint has been reached.  The relation is not
/// transitive, so `Coordinate` deliberately does not implement `Eq`/`Hash`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude:  f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The point reached by travelling `distance_m` metres from `self` along
    /// `heading_deg` (0 = north, 90 = east).
    ///
    /// The latitude step uses the full circumference.  The longitude step uses
    /// the circumference of the parallel at the *new* latitude, which keeps the
    /// east-west error small as meridians converge towards the poles.
    pub fn destination(self, distance_m: f64, heading_deg: f64) -> Coordinate {
        let heading = heading_deg.to_radians();
        let earth_circle = 2.0 * PI * EARTH_RADIUS_M;

        let lat_distance = distance_m * heading.cos();
        let new_lat = self.latitude + lat_distance * (360.0 / earth_circle);

        let lng_distance = distance_m * heading.sin();
        let circle_at_lat = 2.0 * PI * EARTH_RADIUS_M * new_lat.to_radians().cos();
        let new_lng = self.longitude + lng_distance * (360.0 / circle_at_lat);

        Coordinate::new(new_lat, new_lng)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial bearing from `self` towards `to`, in degrees within `[0, 360)`.
    pub fn heading_to(self, to: Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = to.latitude.to_radians();
        let d_lon = (to.longitude - self.longitude).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        let heading = y.atan2(x).to_degrees();
        if heading >= 0.0 { heading } else { heading + 360.0 }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.distance_m(*other) <= COORDINATE_EPSILON_M
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
