//! Waypoint route with a forward/backward cursor.

use ls_core::Coordinate;

/// An ordered, immutable list of waypoints plus a cursor.
///
/// The cursor is `-1` for an empty route and starts at `0` otherwise.  It
/// moves one step at a time and may sit one past the last waypoint, which is
/// how a finished route is represented:
///
/// ```text
///   waypoints:  [ A,  B,  C ]
///   cursor:       0   1   2   3 (= finished)
/// ```
///
/// Only [`advance`][Self::advance] and [`retreat`][Self::retreat] mutate the
/// cursor; reading past either end yields `None`, never a panic.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationRoute {
    coordinates: Vec<Coordinate>,
    cursor:      isize,
}

impl NavigationRoute {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        let cursor = if coordinates.is_empty() { -1 } else { 0 };
        Self { coordinates, cursor }
    }

    /// All waypoints, regardless of the cursor.
    #[inline]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Raw cursor position in `[-1, len]`.
    #[inline]
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// `true` until the first waypoint has been passed.
    #[inline]
    pub fn is_at_start(&self) -> bool {
        self.cursor <= 0
    }

    /// `true` once the cursor has moved past the last waypoint.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.coordinates.len() as isize
    }

    /// The waypoint under the cursor, or `None` if the cursor is out of range.
    pub fn current(&self) -> Option<Coordinate> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|i| self.coordinates.get(i))
            .copied()
    }

    /// Waypoints already passed (before the cursor).
    pub fn traveled(&self) -> &[Coordinate] {
        let end = self.cursor.clamp(0, self.coordinates.len() as isize) as usize;
        &self.coordinates[..end]
    }

    /// Waypoints still ahead, including the one under the cursor.
    pub fn upcoming(&self) -> &[Coordinate] {
        let start = self.cursor.clamp(0, self.coordinates.len() as isize) as usize;
        &self.coordinates[start..]
    }

    /// Move the cursor forward by one.  Returns `false` if already finished.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move the cursor back by one.  Returns `false` if already at index 0
    /// (or the route is empty).
    pub fn retreat(&mut self) -> bool {
        if self.cursor - 1 < 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}

/// Routes are identified by their waypoints, not their progress: the same
/// path travelled in either direction compares equal.
impl PartialEq for NavigationRoute {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && (self.coordinates == other.coordinates
                || self.coordinates.iter().eq(other.coordinates.iter().rev()))
    }
}

impl From<Vec<Coordinate>> for NavigationRoute {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates)
    }
}
