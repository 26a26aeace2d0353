//! `ls-device`: the device capability consumed by the spoofer.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`device`]     | `Device` trait: `simulate_location`, `disable_simulation`    |
//! | [`connection`] | `ConnectionType`: USB / network set                          |
//! | [`registry`]   | `DeviceRegistry`, `DeviceInfo`, `DeviceChange`               |
//! | [`memory`]     | `MemoryDevice`: in-process device for tests and demos        |
//! | [`error`]      | `DeviceError`, `DeviceResult<T>`                             |
//!
//! The real transports (USB lockdown services, simulator bridges) live
//! outside this workspace and plug in by implementing [`Device`].

pub mod connection;
pub mod device;
pub mod error;
pub mod memory;
pub mod registry;

#[cfg(test)]
mod tests;

pub use connection::ConnectionType;
pub use device::{Device, describe};
pub use error::{DeviceError, DeviceResult};
pub use memory::MemoryDevice;
pub use registry::{DeviceChange, DeviceInfo, DeviceRegistry};
