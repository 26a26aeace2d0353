//! The `Device` trait: the capability the spoofer pushes locations into.

use ls_core::Coordinate;

use crate::ConnectionType;

/// A controllable endpoint whose reported location can be overridden.
///
/// Implement this trait for a real transport (USB/network lockdown service,
/// simulator bridge, …).  The spoofer only ever calls the two capability
/// methods, always from its worker context and never concurrently.
///
/// # Blocking
///
/// Both capability methods are synchronous from the spoofer's point of view.
/// Implementations backed by asynchronous I/O must block until the operation
/// has completed and report the outcome as a `bool`.
///
/// # Thread safety
///
/// The device is shared between the caller's thread and the worker context,
/// so implementations must be `Send + Sync`.
pub trait Device: Send + Sync + 'static {
    /// Unique device identifier (UDID).
    fn udid(&self) -> &str;

    /// Display name, e.g. "John's iPhone".
    fn name(&self) -> &str;

    /// Product name such as "iPhone OS", if known.
    fn product_name(&self) -> Option<&str> {
        None
    }

    /// OS version string, if known.
    fn version(&self) -> Option<&str> {
        None
    }

    fn connection_type(&self) -> ConnectionType {
        ConnectionType::UNKNOWN
    }

    /// Override the device location.  Returns `true` on success.
    fn simulate_location(&self, coordinate: Coordinate) -> bool;

    /// Stop overriding and fall back to the real location.  Returns `true` on
    /// success.
    fn disable_simulation(&self) -> bool;
}

/// One-line description used in logs.
pub fn describe(device: &dyn Device) -> String {
    format!(
        "{} (udid: {}, connection: {})",
        device.name(),
        device.udid(),
        device.connection_type()
    )
}
