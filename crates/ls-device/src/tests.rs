//! Unit tests for ls-device.

use ls_core::Coordinate;

use crate::{
    ConnectionType, Device, DeviceChange, DeviceError, DeviceInfo, DeviceRegistry, MemoryDevice,
};

// ── ConnectionType ────────────────────────────────────────────────────────────

#[cfg(test)]
mod connection {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut c = ConnectionType::USB;
        assert!(c.contains(ConnectionType::USB));
        assert!(!c.contains(ConnectionType::NETWORK));
        c.insert(ConnectionType::NETWORK);
        assert!(c.contains(ConnectionType::NETWORK));
        c.remove(ConnectionType::USB);
        assert_eq!(c, ConnectionType::NETWORK);
        c.remove(ConnectionType::NETWORK);
        assert!(c.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(ConnectionType::UNKNOWN.to_string(), "unknown");
        assert_eq!(ConnectionType::USB.to_string(), "usb");
        assert_eq!(ConnectionType::NETWORK.to_string(), "network");
        assert_eq!(ConnectionType::USB.union(ConnectionType::NETWORK).to_string(), "usb, network");
    }
}

// ── DeviceRegistry ────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    fn phone(conn: ConnectionType) -> DeviceInfo {
        DeviceInfo::new("00008030-001", "Test iPhone", conn)
    }

    #[test]
    fn first_attach_connects() {
        let mut reg = DeviceRegistry::new();
        let change = reg.attach(phone(ConnectionType::USB)).unwrap();
        assert!(matches!(change, DeviceChange::Connected(ref i) if i.udid == "00008030-001"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn second_transport_changes() {
        let mut reg = DeviceRegistry::new();
        reg.attach(phone(ConnectionType::USB)).unwrap();
        let change = reg.attach(phone(ConnectionType::NETWORK)).unwrap();
        match change {
            DeviceChange::Changed(info) => {
                assert!(info.connection.contains(ConnectionType::USB));
                assert!(info.connection.contains(ConnectionType::NETWORK));
            }
            other => panic!("expected Changed, got {other:?}"),
        }
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn repeated_attach_is_unchanged() {
        let mut reg = DeviceRegistry::new();
        reg.attach(phone(ConnectionType::USB)).unwrap();
        assert_eq!(reg.attach(phone(ConnectionType::USB)).unwrap(), DeviceChange::Unchanged);
    }

    #[test]
    fn detach_last_transport_disconnects() {
        let mut reg = DeviceRegistry::new();
        reg.attach(phone(ConnectionType::USB)).unwrap();
        reg.attach(phone(ConnectionType::NETWORK)).unwrap();

        let first = reg.detach("00008030-001", ConnectionType::USB).unwrap();
        assert!(matches!(
            first,
            DeviceChange::Changed(ref i) if i.connection == ConnectionType::NETWORK
        ));

        let second = reg.detach("00008030-001", ConnectionType::NETWORK).unwrap();
        assert!(matches!(second, DeviceChange::Disconnected(_)));
        assert!(reg.is_empty());
    }

    #[test]
    fn detach_unknown_is_none() {
        let mut reg = DeviceRegistry::new();
        assert_eq!(reg.detach("nope", ConnectionType::USB), None);
    }

    #[test]
    fn empty_udid_rejected() {
        let mut reg = DeviceRegistry::new();
        let err = reg.attach(DeviceInfo::new("", "x", ConnectionType::USB)).unwrap_err();
        assert!(matches!(err, DeviceError::EmptyUdid));
    }

    #[test]
    fn clear_disconnects_everything() {
        let mut reg = DeviceRegistry::new();
        reg.attach(DeviceInfo::new("b", "B", ConnectionType::USB)).unwrap();
        reg.attach(DeviceInfo::new("a", "A", ConnectionType::NETWORK)).unwrap();
        assert_eq!(reg.devices().iter().map(|d| d.udid.as_str()).collect::<Vec<_>>(), ["a", "b"]);

        let gone = reg.clear();
        assert_eq!(gone.len(), 2);
        assert!(gone.iter().all(|c| matches!(c, DeviceChange::Disconnected(_))));
        assert!(reg.is_empty());
    }
}

// ── MemoryDevice ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::*;

    #[test]
    fn records_pushes() {
        let dev = MemoryDevice::new("mem-1", "Memory").with_connection(ConnectionType::USB);
        assert_eq!(dev.udid(), "mem-1");
        assert_eq!(dev.connection_type(), ConnectionType::USB);
        assert!(!dev.is_simulating());

        assert!(dev.simulate_location(Coordinate::new(1.0, 2.0)));
        assert!(dev.simulate_location(Coordinate::new(3.0, 4.0)));
        assert_eq!(dev.pushed().len(), 2);
        assert_eq!(dev.last_pushed(), Some(Coordinate::new(3.0, 4.0)));
        assert!(dev.is_simulating());

        assert!(dev.disable_simulation());
        assert_eq!(dev.resets(), 1);
        assert!(!dev.is_simulating());
    }

    #[test]
    fn failing_push_is_not_recorded() {
        let dev = MemoryDevice::new("mem-2", "Memory");
        dev.set_fail_pushes(true);
        assert!(!dev.simulate_location(Coordinate::new(1.0, 2.0)));
        assert_eq!(dev.push_attempts(), 1);
        assert!(dev.pushed().is_empty());

        dev.set_fail_resets(true);
        assert!(!dev.disable_simulation());
        assert_eq!(dev.resets(), 0);
    }

    #[test]
    fn describe_mentions_identity() {
        let dev = MemoryDevice::new("mem-3", "Bench");
        let text = crate::describe(&dev);
        assert!(text.contains("Bench") && text.contains("mem-3") && text.contains("unknown"));
    }
}
