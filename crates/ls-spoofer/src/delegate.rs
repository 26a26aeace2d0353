//! Delegate trait for spoofer lifecycle notifications.

use ls_core::{Coordinate, MoveType};
use ls_motion::MoveState;

use crate::Spoofer;

/// Callbacks fired by a [`Spoofer`] on its notification context.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  A `None` coordinate in the location
/// callbacks means the location is being (or was) reset to the real one.
///
/// Callbacks run one at a time, in the order the events happened: every
/// `will_change_location` precedes the matching `did_change_location` or
/// `error_changing_location`.  They run on the spoofer's notification task,
/// so keep them short; it is fine to call back into the spoofer.
///
/// # Ownership
///
/// The spoofer stores only a weak reference (see
/// [`Spoofer::set_delegate`][crate::Spoofer::set_delegate]); the delegate is
/// owned by the application.
///
/// # Example: location printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SpooferDelegate for Printer {
///     fn did_change_location(&self, spoofer: &Spoofer, to: Option<Coordinate>) {
///         println!("now at {to:?}, {:.1} m travelled", spoofer.total_distance());
///     }
/// }
/// ```
pub trait SpooferDelegate: Send + Sync {
    fn will_change_move_type(&self, _spoofer: &Spoofer, _to: MoveType) {}

    fn did_change_move_type(&self, _spoofer: &Spoofer, _from: MoveType) {}

    fn will_change_move_state(&self, _spoofer: &Spoofer, _to: &MoveState) {}

    fn did_change_move_state(&self, _spoofer: &Spoofer, _from: &MoveState) {}

    fn will_change_location(&self, _spoofer: &Spoofer, _to: Option<Coordinate>) {}

    fn did_change_location(&self, _spoofer: &Spoofer, _to: Option<Coordinate>) {}

    fn will_change_auto_update(&self, _spoofer: &Spoofer, _to: bool) {}

    fn did_change_auto_update(&self, _spoofer: &Spoofer, _from: bool) {}

    /// The device rejected a push (`Some`) or a reset (`None`).
    fn error_changing_location(&self, _spoofer: &Spoofer, _to: Option<Coordinate>) {}
}

/// A [`SpooferDelegate`] that ignores every notification.
pub struct NoopDelegate;

impl SpooferDelegate for NoopDelegate {}

/// A queued delegate callback.
#[derive(Clone, Debug)]
pub enum Notification {
    WillChangeMoveType(MoveType),
    DidChangeMoveType(MoveType),
    WillChangeMoveState(MoveState),
    DidChangeMoveState(MoveState),
    WillChangeLocation(Option<Coordinate>),
    DidChangeLocation(Option<Coordinate>),
    WillChangeAutoUpdate(bool),
    DidChangeAutoUpdate(bool),
    ErrorChangingLocation(Option<Coordinate>),
}

impl Notification {
    /// Invoke the matching delegate method.
    pub fn deliver(&self, delegate: &dyn SpooferDelegate, spoofer: &Spoofer) {
        match self {
            Self::WillChangeMoveType(to)    => delegate.will_change_move_type(spoofer, *to),
            Self::DidChangeMoveType(from)   => delegate.did_change_move_type(spoofer, *from),
            Self::WillChangeMoveState(to)   => delegate.will_change_move_state(spoofer, to),
            Self::DidChangeMoveState(from)  => delegate.did_change_move_state(spoofer, from),
            Self::WillChangeLocation(to)    => delegate.will_change_location(spoofer, *to),
            Self::DidChangeLocation(to)     => delegate.did_change_location(spoofer, *to),
            Self::WillChangeAutoUpdate(to)  => delegate.will_change_auto_update(spoofer, *to),
            Self::DidChangeAutoUpdate(from) => delegate.did_change_auto_update(spoofer, *from),
            Self::ErrorChangingLocation(to) => delegate.error_changing_location(spoofer, *to),
        }
    }
}
