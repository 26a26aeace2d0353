//! Connection-type set for a device.
//!
//! A device can be reachable over USB, over the network, or both at once.
//! The empty set means the transport is unknown.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionType(u8);

impl ConnectionType {
    pub const UNKNOWN: ConnectionType = ConnectionType(0);
    pub const USB:     ConnectionType = ConnectionType(1 << 0);
    pub const NETWORK: ConnectionType = ConnectionType(1 << 1);

    #[inline]
    pub fn contains(self, other: ConnectionType) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: ConnectionType) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: ConnectionType) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: ConnectionType) -> ConnectionType {
        ConnectionType(self.0 | other.0)
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::USB), self.contains(Self::NETWORK)) {
            (true, true)   => f.write_str("usb, network"),
            (true, false)  => f.write_str("usb"),
            (false, true)  => f.write_str("network"),
            (false, false) => f.write_str("unknown"),
        }
    }
}
