//! `ls-motion`: route cursor and move-state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`route`]   | `NavigationRoute`: waypoints plus a cursor                        |
//! | [`state`]   | `MoveState`: manual / auto / navigating, next location + interval  |
//!
//! # Movement model
//!
//! Every auto-update tick the spoofer asks the current [`MoveState`] for the
//! next coordinate given the previous one, a distance (speed × elapsed time)
//! and a heading:
//!
//! 1. **Manual**: stays put, except that auto-update adds a 5–10 m random
//!    offset from the last intentional fix every 5–15 s.
//! 2. **Auto**: moves `distance` metres along `heading`.
//! 3. **Navigating**: first goes to the route's start waypoint, then moves
//!    towards the current waypoint and snaps onto it when the step would reach
//!    or pass it.  An exhausted route yields `None`, which stops auto-update.
//!
//! Everything here is synchronous and free of I/O; randomness comes from an
//! injected [`ls_core::MotionRng`].

pub mod route;
pub mod state;

#[cfg(test)]
mod tests;

pub use route::NavigationRoute;
pub use state::MoveState;
