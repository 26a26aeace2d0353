//! The `Spoofer` and its push / auto-update pipeline.

use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::{Duration, Instant};

use ls_core::config::check_range;
use ls_core::{Coordinate, MotionProfile, MotionRng, MoveType};
use ls_device::Device;
use ls_motion::MoveState;

use crate::context::{NotificationContext, WorkerContext};
use crate::{Notification, Scheduler, SpooferBuilder, SpooferDelegate, SpooferError, SpooferResult};

/// Called on the notification context with the push outcome.
type Completion = Box<dyn FnOnce(&Spoofer, bool) + Send + 'static>;

// ── State ─────────────────────────────────────────────────────────────────────

/// Everything the spoofer mutates, guarded by one mutex.
pub(crate) struct SpooferState {
    /// Last successfully pushed location, including GPS jitter.
    pub(crate) current_location: Option<Coordinate>,

    /// Last intentionally set location.  Jitter radiates from here.
    pub(crate) real_current_location: Option<Coordinate>,

    /// Metres travelled since the last successful reset.
    pub(crate) total_distance: f64,

    pub(crate) heading: f64,
    pub(crate) speed: f64,
    pub(crate) movement_speed_variance: Option<Range<f64>>,
    pub(crate) move_type: MoveType,
    pub(crate) move_state: MoveState,
    pub(crate) is_auto_updating: bool,

    /// Pushes submitted but not yet completed on the notification context.
    pub(crate) pending_pushes: usize,

    pub(crate) rng: MotionRng,
}

// ── Shared ────────────────────────────────────────────────────────────────────

/// The part of a spoofer shared between handles, the worker and the timer.
pub(crate) struct Shared {
    pub(crate) device:    Arc<dyn Device>,
    pub(crate) profile:   MotionProfile,
    pub(crate) state:     Mutex<SpooferState>,
    pub(crate) delegate:  RwLock<Option<Weak<dyn SpooferDelegate>>>,
    pub(crate) worker:    WorkerContext,
    pub(crate) notifier:  NotificationContext,
    pub(crate) scheduler: Scheduler,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SpooferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn set_auto_updating(&self, state: &mut SpooferState, value: bool) {
        if state.is_auto_updating == value {
            return;
        }
        self.notify(Notification::WillChangeAutoUpdate(value));
        state.is_auto_updating = value;
        self.notify(Notification::DidChangeAutoUpdate(!value));
        tracing::info!(
            mode = state.move_state.name(),
            "auto update {}",
            if value { "started" } else { "stopped" }
        );
    }

    fn stop_auto_update(&self, state: &mut SpooferState) {
        if !state.is_auto_updating {
            return;
        }
        self.scheduler.cancel_pending();
        self.set_auto_updating(state, false);
    }

    /// Arm the next auto-update tick.  No-op (returning `false`) once auto
    /// update has been switched off, which is how an in-flight push completing
    /// after `stop_auto_update` ends the loop.
    fn schedule_next_update(
        self: &Arc<Self>,
        state:     &SpooferState,
        after:     Duration,
        last_time: Option<Instant>,
    ) -> bool {
        if !state.is_auto_updating {
            return false;
        }

        let weak = Arc::downgrade(self);
        self.scheduler.schedule(after, move |token| {
            let Some(shared) = weak.upgrade() else { return };
            let tick = Arc::clone(&shared);
            shared.worker.submit(move || {
                if token.is_cancelled() {
                    return;
                }
                tick.update(after, last_time);
            });
        });
        true
    }

    /// Send `coordinate` to the device.
    ///
    /// State is updated on the worker right after the device call; the
    /// completion and the did-change / error callback run afterwards on the
    /// notification context.
    fn push_location(
        self: &Arc<Self>,
        state:                   &mut SpooferState,
        coordinate:              Coordinate,
        is_gps_uncertainty_update: bool,
        completion:              Option<Completion>,
    ) {
        state.pending_pushes += 1;
        self.notify(Notification::WillChangeLocation(Some(coordinate)));

        let shared = Arc::clone(self);
        self.worker.submit(move || {
            let success = shared.device.simulate_location(coordinate);
            if success {
                let mut state = shared.state();
                let step = state.current_location.map_or(0.0, |c| c.distance_m(coordinate));
                state.total_distance += step;
                state.current_location = Some(coordinate);
                if !is_gps_uncertainty_update {
                    state.real_current_location = Some(coordinate);
                }
                tracing::debug!(
                    %coordinate,
                    step_m = step,
                    total_m = state.total_distance,
                    "location pushed"
                );
            } else {
                tracing::warn!(
                    %coordinate,
                    device = shared.device.udid(),
                    "device rejected location"
                );
            }

            shared.notifier.run(move |spoofer| {
                if let Some(completion) = completion {
                    completion(spoofer, success);
                }
                spoofer.deliver(&if success {
                    Notification::DidChangeLocation(Some(coordinate))
                } else {
                    Notification::ErrorChangingLocation(Some(coordinate))
                });
                let mut state = spoofer.shared.state();
                state.pending_pushes = state.pending_pushes.saturating_sub(1);
            });
        });
    }

    /// One auto-update tick.  Runs on the worker.
    fn update(self: &Arc<Self>, interval: Duration, last_time: Option<Instant>) {
        let mut guard = self.state();
        let state = &mut *guard;
        if !state.is_auto_updating {
            return;
        }

        let mut speed = state.speed;
        if let Some(variance) = &state.movement_speed_variance {
            speed = (speed * state.rng.sample(variance)).max(0.0);
        }

        // Distance follows wall-clock time since the previous tick.
        let distance = match last_time {
            Some(t) => speed * t.elapsed().as_secs_f64(),
            None    => speed * interval.as_secs_f64(),
        };

        // Jitter always radiates from the last intentional fix.
        let is_manual = state.move_state.is_manual();
        let previous = if is_manual {
            state.real_current_location
        } else {
            state.current_location
        };
        if previous.is_none() && state.move_state.needs_previous_location() {
            tracing::error!(
                mode = state.move_state.name(),
                "route already started but there is no location to continue from"
            );
            self.stop_auto_update(state);
            return;
        }

        let next = state.move_state.next_location(
            distance,
            state.heading,
            previous,
            true,
            &self.profile,
            &mut state.rng,
        );
        let Some(next) = next else {
            tracing::debug!(mode = state.move_state.name(), "nowhere left to go");
            self.stop_auto_update(state);
            return;
        };

        let now = Instant::now();
        let next_interval = state.move_state.next_auto_update_interval(
            Some(interval),
            &self.profile,
            &mut state.rng,
        );

        self.push_location(
            state,
            next,
            is_manual,
            Some(Box::new(move |spoofer: &Spoofer, success| {
                let shared = &spoofer.shared;
                let mut state = shared.state();
                if success {
                    shared.schedule_next_update(&state, next_interval, Some(now));
                } else {
                    shared.stop_auto_update(&mut state);
                }
            }) as Completion),
        );
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.scheduler.cancel_pending();
    }
}

// ── Spoofer ───────────────────────────────────────────────────────────────────

/// Drives a [`Device`]'s simulated location.
///
/// Cheap to clone: all clones share the same state and device.  Every method
/// returns immediately; device I/O happens on the worker context and results
/// arrive through the [`SpooferDelegate`].
///
/// Create via [`SpooferBuilder`].
#[derive(Clone)]
pub struct Spoofer {
    pub(crate) shared: Arc<Shared>,
}

impl Spoofer {
    /// Start building a spoofer for `device`.
    pub fn builder(device: Arc<dyn Device>) -> SpooferBuilder {
        SpooferBuilder::new(device)
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Invoke the delegate, if it is still alive.
    pub(crate) fn deliver(&self, notification: &Notification) {
        let delegate = self
            .shared
            .delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(delegate) = delegate {
            notification.deliver(delegate.as_ref(), self);
        }
    }

    // ── Delegate ──────────────────────────────────────────────────────────

    /// Register `delegate` without taking ownership of it.
    ///
    /// Notifications stop once the application drops its last `Arc`.
    pub fn set_delegate<D: SpooferDelegate + 'static>(&self, delegate: &Arc<D>) {
        let weak: Weak<dyn SpooferDelegate> = Arc::downgrade(delegate) as Weak<dyn SpooferDelegate>;
        *self.shared.delegate.write().unwrap_or_else(PoisonError::into_inner) = Some(weak);
    }

    pub fn clear_delegate(&self) {
        *self.shared.delegate.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.shared.device
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.shared.profile
    }

    /// Last location the device accepted, GPS jitter included.
    pub fn current_location(&self) -> Option<Coordinate> {
        self.shared.state().current_location
    }

    /// Last intentionally set location, without GPS jitter.
    pub fn real_current_location(&self) -> Option<Coordinate> {
        self.shared.state().real_current_location
    }

    /// Metres travelled since the last successful reset.
    pub fn total_distance(&self) -> f64 {
        self.shared.state().total_distance
    }

    pub fn heading(&self) -> f64 {
        self.shared.state().heading
    }

    /// Heading in degrees; takes effect on the next step or tick.
    pub fn set_heading(&self, heading: f64) {
        self.shared.state().heading = heading;
    }

    pub fn speed(&self) -> f64 {
        self.shared.state().speed
    }

    /// Speed in m/s used by auto update.  Negative values are clamped to 0.
    pub fn set_speed(&self, speed: f64) {
        self.shared.state().speed = speed.max(0.0);
    }

    pub fn movement_speed_variance(&self) -> Option<Range<f64>> {
        self.shared.state().movement_speed_variance.clone()
    }

    /// Vary the auto-update speed by a factor drawn from `variance` on every
    /// tick, e.g. `0.8..1.2`.  `None` disables the variance.
    pub fn set_movement_speed_variance(&self, variance: Option<Range<f64>>) -> SpooferResult<()> {
        if let Some(range) = &variance {
            check_range("movement speed variance", range)?;
        }
        self.shared.state().movement_speed_variance = variance;
        Ok(())
    }

    pub fn move_type(&self) -> MoveType {
        self.shared.state().move_type
    }

    pub fn set_move_type(&self, move_type: MoveType) {
        let mut state = self.shared.state();
        if state.move_type == move_type {
            return;
        }
        self.shared.notify(Notification::WillChangeMoveType(move_type));
        let previous = std::mem::replace(&mut state.move_type, move_type);
        self.shared.notify(Notification::DidChangeMoveType(previous));
    }

    /// A snapshot of the current move state.
    pub fn move_state(&self) -> MoveState {
        self.shared.state().move_state.clone()
    }

    /// Replace the move state.  Notifications fire only if the new state
    /// differs (routes compare by waypoints, in either direction).
    pub fn set_move_state(&self, move_state: MoveState) {
        let mut state = self.shared.state();
        let changed = state.move_state != move_state;
        if changed {
            self.shared.notify(Notification::WillChangeMoveState(move_state.clone()));
        }
        let previous = std::mem::replace(&mut state.move_state, move_state);
        if changed {
            self.shared.notify(Notification::DidChangeMoveState(previous));
        }
    }

    pub fn is_auto_updating(&self) -> bool {
        self.shared.state().is_auto_updating
    }

    /// `true` while a location push has not completed yet.
    pub fn has_pending_task(&self) -> bool {
        self.shared.state().pending_pushes > 0
    }

    /// `true` while an auto-update tick is armed and waiting to fire.
    pub fn is_update_scheduled(&self) -> bool {
        self.shared.scheduler.has_pending()
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Jump to `coordinate`.  Ignored unless the move state is manual.
    pub fn set_location(&self, coordinate: Coordinate) {
        let mut state = self.shared.state();
        if !state.move_state.is_manual() {
            tracing::debug!(
                mode = state.move_state.name(),
                "set_location ignored outside manual mode"
            );
            return;
        }
        self.shared.push_location(&mut state, coordinate, false, None);
    }

    /// Stop spoofing and return the device to its real location.
    ///
    /// Auto update is stopped first.  On success the travelled distance and
    /// both locations are cleared; on failure the state is left untouched and
    /// `error_changing_location(None)` fires.
    pub fn reset_location(&self) {
        let shared = &self.shared;
        shared.notify(Notification::WillChangeLocation(None));
        shared.stop_auto_update(&mut shared.state());

        let worker = Arc::clone(shared);
        shared.worker.submit(move || {
            let success = worker.device.disable_simulation();
            if success {
                let mut state = worker.state();
                state.total_distance = 0.0;
                state.current_location = None;
                state.real_current_location = None;
                tracing::info!(device = worker.device.udid(), "location reset");
            } else {
                tracing::warn!(
                    device = worker.device.udid(),
                    "device rejected location reset"
                );
            }
            worker.notify(if success {
                Notification::DidChangeLocation(None)
            } else {
                Notification::ErrorChangingLocation(None)
            });
        });
    }

    /// Take one manual step: one second of travel at the move type's speed
    /// along the current heading (or along the route when navigating).
    ///
    /// # Errors
    ///
    /// - [`SpooferError::QueueBusy`] if a push is still in flight.
    /// - [`SpooferError::InteractionNotPossible`] if auto update is running in
    ///   a mode other than manual.
    pub fn step(&self) -> SpooferResult<()> {
        let shared = &self.shared;
        let mut guard = shared.state();
        let state = &mut *guard;

        if state.pending_pushes > 0 {
            return Err(SpooferError::QueueBusy);
        }
        if state.is_auto_updating && !state.move_state.is_manual() {
            return Err(SpooferError::InteractionNotPossible(state.move_state.name()));
        }
        if state.current_location.is_none() && state.move_state.needs_previous_location() {
            tracing::warn!("step ignored: route already started but there is no location");
            return Ok(());
        }

        let next = state.move_state.next_location(
            state.move_type.speed(),
            state.heading,
            state.current_location,
            false,
            &shared.profile,
            &mut state.rng,
        );
        let Some(next) = next else {
            return Ok(());
        };

        if !state.is_auto_updating {
            shared.push_location(state, next, false, None);
            return Ok(());
        }

        // The jitter timer restarts from this step.
        shared.scheduler.cancel_pending();
        let interval =
            state.move_state.next_auto_update_interval(None, &shared.profile, &mut state.rng);
        shared.push_location(
            state,
            next,
            false,
            Some(Box::new(move |spoofer: &Spoofer, success| {
                if success {
                    let shared = &spoofer.shared;
                    shared.schedule_next_update(&shared.state(), interval, None);
                }
            }) as Completion),
        );
        Ok(())
    }

    /// Start moving automatically.
    ///
    /// Returns `true` if auto update is (now) running, `false` if the move
    /// state needs a current location and there is none.  A route that was
    /// already started needs one, e.g. after `reset_location`.
    pub fn start_auto_update(&self) -> bool {
        let shared = &self.shared;
        let mut guard = shared.state();
        let state = &mut *guard;

        if state.is_auto_updating {
            return true;
        }
        let needs_location = state.move_state.requires_initial_location_for_auto_update()
            || state.move_state.needs_previous_location();
        if needs_location && state.current_location.is_none() {
            return false;
        }

        shared.set_auto_updating(state, true);
        let interval =
            state.move_state.next_auto_update_interval(None, &shared.profile, &mut state.rng);
        shared.schedule_next_update(state, interval, None);
        true
    }

    /// Stop moving automatically.  Idempotent.  A push already in flight
    /// still completes, but no further tick is scheduled.
    pub fn stop_auto_update(&self) {
        self.shared.stop_auto_update(&mut self.shared.state());
    }

    pub fn toggle_auto_update(&self) {
        if self.is_auto_updating() {
            self.stop_auto_update();
        } else {
            self.start_auto_update();
        }
    }
}

impl std::fmt::Debug for Spoofer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state();
        f.debug_struct("Spoofer")
            .field("device", &self.shared.device.udid())
            .field("current_location", &state.current_location)
            .field("total_distance", &state.total_distance)
            .field("move_type", &state.move_type)
            .field("move_state", &state.move_state.name())
            .field("is_auto_updating", &state.is_auto_updating)
            .finish()
    }
}
