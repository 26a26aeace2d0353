//! `DeviceRegistry`: the set of currently known devices.
//!
//! Discovery back-ends report raw attach/detach events per connection type.
//! The registry folds those into per-device state and tells the caller what
//! actually changed, so a device seen over USB and then over Wi-Fi produces
//! one `Connected` followed by one `Changed`, not two connections.
//!
//! The registry is an ordinary owned value: create it where discovery starts,
//! drop or [`clear`][DeviceRegistry::clear] it where discovery stops.

use std::collections::HashMap;

use crate::{ConnectionType, DeviceError, DeviceResult};

/// Metadata describing a discovered device.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceInfo {
    pub udid:         String,
    pub name:         String,
    pub product_name: Option<String>,
    pub version:      Option<String>,
    pub connection:   ConnectionType,
}

impl DeviceInfo {
    pub fn new(
        udid:       impl Into<String>,
        name:       impl Into<String>,
        connection: ConnectionType,
    ) -> Self {
        Self {
            udid:         udid.into(),
            name:         name.into(),
            product_name: None,
            version:      None,
            connection,
        }
    }
}

/// What a registry update meant for the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceChange {
    /// A previously unknown device appeared.
    Connected(DeviceInfo),
    /// A known device gained or lost a connection type.
    Changed(DeviceInfo),
    /// The device's last connection went away; it is no longer registered.
    Disconnected(DeviceInfo),
    /// The event carried nothing new.
    Unchanged,
}

#[derive(Default, Debug)]
pub struct DeviceRegistry {
    devices: HashMap<String, DeviceInfo>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `info.udid` is reachable over `info.connection`.
    pub fn attach(&mut self, info: DeviceInfo) -> DeviceResult<DeviceChange> {
        if info.udid.is_empty() {
            return Err(DeviceError::EmptyUdid);
        }

        let change = match self.devices.get_mut(&info.udid) {
            Some(known) if known.connection.contains(info.connection) => DeviceChange::Unchanged,
            Some(known) => {
                known.connection.insert(info.connection);
                DeviceChange::Changed(known.clone())
            }
            None => {
                self.devices.insert(info.udid.clone(), info.clone());
                DeviceChange::Connected(info)
            }
        };

        if change != DeviceChange::Unchanged {
            tracing::debug!(?change, "device registry updated");
        }
        Ok(change)
    }

    /// Record that `udid` is no longer reachable over `connection`.
    ///
    /// Returns `None` for a device the registry never saw.
    pub fn detach(&mut self, udid: &str, connection: ConnectionType) -> Option<DeviceChange> {
        let known = self.devices.get_mut(udid)?;
        known.connection.remove(connection);

        let change = if known.connection.is_empty() {
            let info = self.devices.remove(udid)?;
            DeviceChange::Disconnected(info)
        } else {
            DeviceChange::Changed(known.clone())
        };
        tracing::debug!(?change, "device registry updated");
        Some(change)
    }

    pub fn get(&self, udid: &str) -> Option<&DeviceInfo> {
        self.devices.get(udid)
    }

    /// All registered devices, sorted by UDID for stable output.
    pub fn devices(&self) -> Vec<&DeviceInfo> {
        let mut all: Vec<&DeviceInfo> = self.devices.values().collect();
        all.sort_by(|a, b| a.udid.cmp(&b.udid));
        all
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Drop every device, returning a `Disconnected` change for each.
    pub fn clear(&mut self) -> Vec<DeviceChange> {
        let mut gone: Vec<DeviceInfo> = self.devices.drain().map(|(_, info)| info).collect();
        gone.sort_by(|a, b| a.udid.cmp(&b.udid));
        gone.into_iter().map(DeviceChange::Disconnected).collect()
    }
}
