//! `ls-spoofer`: drives a device's simulated location.
//!
//! # Pipeline
//!
//! ```text
//! set_location / step / auto-update tick
//!   ① will_change_location(coord)          → notification context
//!   ② Device::simulate_location(coord)     → worker context (serial, blocking)
//!   ③ on success: total distance, current (and real) location updated
//!   ④ completion + did_change_location / error_changing_location
//!                                          → notification context
//!   ⑤ auto update only: on success re-arm the next tick on the Scheduler;
//!      on failure stop auto update.
//! ```
//!
//! A manual `step()` while a push is in flight fails with
//! [`SpooferError::QueueBusy`] instead of queueing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`spoofer`]   | `Spoofer`: the public handle                            |
//! | [`builder`]   | `SpooferBuilder`                                        |
//! | [`config`]    | `SpooferConfig`: initial speed, heading, variance, seed  |
//! | [`delegate`]  | `SpooferDelegate`, `NoopDelegate`, `Notification`       |
//! | [`scheduler`] | `Scheduler`, `CancelToken`: single-slot delayed task    |
//! | [`error`]     | `SpooferError`, `SpooferResult<T>`                      |
//!
//! All background work runs on tokio; build the spoofer from inside a runtime
//! or pass a [`tokio::runtime::Handle`] to [`SpooferBuilder::runtime`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ls_core::Coordinate;
//! use ls_device::MemoryDevice;
//! use ls_motion::MoveState;
//! use ls_spoofer::Spoofer;
//!
//! let spoofer = Spoofer::builder(Arc::new(MemoryDevice::new("0000-1111", "phone"))).build()?;
//! spoofer.set_location(Coordinate::new(52.52, 13.405));
//! spoofer.set_move_state(MoveState::Auto);
//! spoofer.start_auto_update();
//! ```

pub mod builder;
pub mod config;
pub mod delegate;
pub mod error;
pub mod scheduler;
pub mod spoofer;

mod context;


pub use builder::SpooferBuilder;
pub use config::SpooferConfig;
pub use delegate::{NoopDelegate, Notification, SpooferDelegate};
pub use error::{SpooferError, SpooferResult};
pub use scheduler::{CancelToken, Scheduler};
pub use spoofer::Spoofer;
