//! Unit tests for ls-motion.

use std::time::Duration;

use ls_core::{Coordinate, MotionProfile, MotionRng};

use crate::{MoveState, NavigationRoute};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon)
}

/// Two waypoints on the equator, ~1113 m apart.
fn equator_route() -> NavigationRoute {
    NavigationRoute::new(vec![c(0.0, 0.0), c(0.0, 0.01)])
}

fn navigating(route: NavigationRoute) -> MoveState {
    MoveState::Navigating(route)
}

fn cursor(state: &MoveState) -> isize {
    state.route().expect("navigating").cursor()
}

fn step(
    state:    &mut MoveState,
    distance: f64,
    previous: Option<Coordinate>,
    rng:      &mut MotionRng,
) -> Option<Coordinate> {
    state.next_location(distance, 0.0, previous, true, &MotionProfile::default(), rng)
}

// ── NavigationRoute ───────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use super::*;

    #[test]
    fn empty_route_has_no_position() {
        let r = NavigationRoute::new(vec![]);
        assert_eq!(r.cursor(), -1);
        assert!(r.is_at_start());
        assert!(!r.is_finished());
        assert_eq!(r.current(), None);
        assert!(r.traveled().is_empty());
        assert!(r.upcoming().is_empty());
    }

    #[test]
    fn non_empty_route_starts_at_zero() {
        let r = equator_route();
        assert_eq!(r.cursor(), 0);
        assert!(r.is_at_start());
        assert_eq!(r.current(), Some(c(0.0, 0.0)));
    }

    #[test]
    fn advance_until_finished() {
        let mut r = equator_route();
        assert!(r.advance());
        assert!(!r.is_at_start());
        assert_eq!(r.current(), Some(c(0.0, 0.01)));
        assert_eq!(r.traveled().len(), 1);
        assert_eq!(r.upcoming().len(), 1);

        assert!(r.advance());
        assert!(r.is_finished());
        assert_eq!(r.current(), None);
        assert_eq!(r.traveled().len(), 2);
        assert!(r.upcoming().is_empty());

        assert!(!r.advance(), "advance past the end is a no-op");
        assert_eq!(r.cursor(), 2);
    }

    #[test]
    fn retreat_stops_at_zero() {
        let mut r = equator_route();
        assert!(!r.retreat());
        r.advance();
        r.advance();
        assert!(r.retreat());
        assert!(r.retreat());
        assert_eq!(r.cursor(), 0);
        assert!(!r.retreat());
    }

    #[test]
    fn equality_ignores_direction_and_cursor() {
        let pts = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.01, 0.01)];
        let forward = NavigationRoute::new(pts.clone());
        let mut reversed = NavigationRoute::new(pts.iter().rev().copied().collect());
        reversed.advance();
        assert_eq!(forward, reversed);
        assert_eq!(forward, forward.clone());
    }

    #[test]
    fn different_routes_differ() {
        let a = NavigationRoute::new(vec![c(0.0, 0.0), c(0.0, 0.01)]);
        let b = NavigationRoute::new(vec![c(0.0, 0.0), c(0.0, 0.02)]);
        let shorter = NavigationRoute::new(vec![c(0.0, 0.0)]);
        assert_ne!(a, b);
        assert_ne!(a, shorter);
    }
}

// ── MoveState basics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod move_state {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(MoveState::Manual.name(), "manual");
        assert_eq!(MoveState::Auto.to_string(), "auto");
        assert_eq!(navigating(equator_route()).name(), "navigation");
    }

    #[test]
    fn equality() {
        assert_eq!(MoveState::Manual, MoveState::Manual);
        assert_eq!(MoveState::Auto, MoveState::Auto);
        assert_ne!(MoveState::Manual, MoveState::Auto);
        assert_eq!(navigating(equator_route()), navigating(equator_route()));
        assert_ne!(navigating(equator_route()), MoveState::Auto);
    }

    #[test]
    fn initial_location_requirement() {
        assert!(MoveState::Manual.requires_initial_location_for_auto_update());
        assert!(MoveState::Auto.requires_initial_location_for_auto_update());
        assert!(!navigating(equator_route()).requires_initial_location_for_auto_update());
    }

    #[test]
    fn manual_interval_is_random_in_range() {
        let profile = MotionProfile::default();
        let mut rng = MotionRng::new(7);
        for _ in 0..200 {
            let i = MoveState::Manual.next_auto_update_interval(
                Some(Duration::from_millis(250)),
                &profile,
                &mut rng,
            );
            assert!(i >= Duration::from_secs(5) && i < Duration::from_secs(15), "{i:?}");
        }
    }

    #[test]
    fn continuous_interval_keeps_previous() {
        let profile = MotionProfile::default();
        let mut rng = MotionRng::new(7);
        let prev = Duration::from_millis(900);
        assert_eq!(MoveState::Auto.next_auto_update_interval(Some(prev), &profile, &mut rng), prev);
        assert_eq!(
            MoveState::Auto.next_auto_update_interval(None, &profile, &mut rng),
            Duration::from_millis(250),
        );
        assert_eq!(
            navigating(equator_route()).next_auto_update_interval(None, &profile, &mut rng),
            Duration::from_millis(250),
        );
    }
}

// ── Manual / Auto next location ───────────────────────────────────────────────

#[cfg(test)]
mod free_movement {
    use super::*;

    #[test]
    fn manual_jitter_stays_within_ring() {
        let origin = c(48.137, 11.575);
        let mut rng = MotionRng::new(99);
        for _ in 0..500 {
            let p = step(&mut MoveState::Manual, 1000.0, Some(origin), &mut rng).unwrap();
            let d = origin.distance_m(p);
            assert!((4.99..10.01).contains(&d), "jitter distance {d}");
            assert_ne!(p, origin);
        }
    }

    #[test]
    fn manual_jitter_without_previous_is_none() {
        let mut rng = MotionRng::new(1);
        assert_eq!(step(&mut MoveState::Manual, 10.0, None, &mut rng), None);
    }

    #[test]
    fn manual_step_uses_distance_and_heading() {
        let origin = c(0.0, 0.0);
        let mut rng = MotionRng::new(1);
        let p = MoveState::Manual
            .next_location(100.0, 90.0, Some(origin), false, &MotionProfile::default(), &mut rng)
            .unwrap();
        assert!((origin.distance_m(p) - 100.0).abs() < 0.01);
        assert!((origin.heading_to(p) - 90.0).abs() < 0.01);
    }

    #[test]
    fn auto_ignores_auto_update_flag() {
        let origin = c(10.0, 10.0);
        let profile = MotionProfile::default();
        let mut rng = MotionRng::new(1);
        let a = MoveState::Auto
            .next_location(50.0, 180.0, Some(origin), true, &profile, &mut rng)
            .unwrap();
        let b = MoveState::Auto
            .next_location(50.0, 180.0, Some(origin), false, &profile, &mut rng)
            .unwrap();
        assert_eq!(a, b);
        assert!(a.latitude < origin.latitude);
        assert_eq!(
            MoveState::Auto.next_location(50.0, 0.0, None, true, &profile, &mut rng),
            None,
        );
    }
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod navigation {
    use super::*;

    #[test]
    fn seeks_start_when_no_previous_location() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(equator_route());
        assert_eq!(step(&mut state, 10.0, None, &mut rng), Some(c(0.0, 0.0)));
        assert_eq!(cursor(&state), 0, "cursor must not move while seeking the start");
    }

    #[test]
    fn seeks_start_when_elsewhere() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(equator_route());
        let elsewhere = c(1.0, 1.0);
        assert_eq!(step(&mut state, 10.0, Some(elsewhere), &mut rng), Some(c(0.0, 0.0)));
        assert_eq!(cursor(&state), 0);
    }

    #[test]
    fn empty_route_yields_none() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(NavigationRoute::new(vec![]));
        assert_eq!(step(&mut state, 10.0, Some(c(0.0, 0.0)), &mut rng), None);
    }

    #[test]
    fn leaves_start_and_heads_to_next_waypoint() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(equator_route());
        let start = c(0.0, 0.0);
        let p = step(&mut state, 100.0, Some(start), &mut rng).unwrap();
        assert_eq!(cursor(&state), 1);
        assert!((start.distance_m(p) - 100.0).abs() < 0.01);
        assert!((start.heading_to(p) - 90.0).abs() < 0.01);
    }

    #[test]
    fn snaps_when_already_at_waypoint() {
        let mut rng = MotionRng::new(1);
        let mut route = equator_route();
        route.advance();
        let mut state = navigating(route);
        let waypoint = c(0.0, 0.01);
        let p = step(&mut state, 5.0, Some(waypoint), &mut rng);
        assert_eq!(p, Some(waypoint));
        assert_eq!(cursor(&state), 2);
    }

    #[test]
    fn never_overshoots_waypoint() {
        let mut rng = MotionRng::new(1);
        let waypoint = c(0.0, 0.01);
        let previous = c(0.0, 0.0099);
        let gap = previous.distance_m(waypoint);
        for d in [gap, gap * 1.5, gap * 10.0] {
            let mut route = equator_route();
            route.advance();
            let mut state = navigating(route);
            assert_eq!(step(&mut state, d, Some(previous), &mut rng), Some(waypoint));
            assert_eq!(cursor(&state), 2);
        }
    }

    #[test]
    fn walks_route_monotonically_and_finishes() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(equator_route());
        let end = c(0.0, 0.01);
        let mut position = c(0.0, 0.0);
        let mut remaining = position.distance_m(end);

        let mut reached = false;
        for _ in 0..100 {
            let Some(next) = step(&mut state, 100.0, Some(position), &mut rng) else {
                break;
            };
            let now_remaining = next.distance_m(end);
            assert!(now_remaining < remaining, "moved away from the waypoint");
            assert!(next.longitude <= end.longitude + 1e-12, "overshot the waypoint");
            remaining = now_remaining;
            position = next;
            if next == end {
                reached = true;
            }
        }

        assert!(reached);
        assert!(state.route().unwrap().is_finished());
        assert_eq!(step(&mut state, 100.0, Some(position), &mut rng), None);
    }

    #[test]
    fn advancing_replaces_the_state_value() {
        let mut rng = MotionRng::new(1);
        let mut state = navigating(equator_route());
        let snapshot = state.clone();
        step(&mut state, 100.0, Some(c(0.0, 0.0)), &mut rng);
        assert_eq!(cursor(&snapshot), 0);
        assert_eq!(cursor(&state), 1);
        assert_eq!(snapshot, state, "route identity ignores the cursor");
    }

    #[test]
    fn needs_previous_location_only_between_start_and_end() {
        assert!(!MoveState::Manual.needs_previous_location());
        assert!(!MoveState::Auto.needs_previous_location());
        assert!(!navigating(NavigationRoute::new(vec![])).needs_previous_location());

        let mut route = equator_route();
        assert!(!navigating(route.clone()).needs_previous_location());
        route.advance();
        assert!(navigating(route.clone()).needs_previous_location());
        route.advance();
        assert!(route.is_finished());
        assert!(!navigating(route).needs_previous_location());
    }

    #[test]
    #[should_panic(expected = "no previous location")]
    fn missing_previous_location_past_start_panics() {
        let mut rng = MotionRng::new(1);
        let mut route = equator_route();
        route.advance();
        let mut state = navigating(route);
        step(&mut state, 10.0, None, &mut rng);
    }
}
