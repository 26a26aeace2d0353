//! An in-process device that records what it is told.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use ls_core::Coordinate;

use crate::{ConnectionType, Device};

/// A [`Device`] that keeps every simulated location in memory.
///
/// Useful in tests and demos, and as a stand-in while no hardware is
/// attached.  Pushes can be made to fail, or to take a fixed amount of time,
/// to exercise the spoofer's failure and backpressure paths.
#[derive(Debug)]
pub struct MemoryDevice {
    udid:          String,
    name:          String,
    connection:    ConnectionType,
    latency:       Mutex<Duration>,
    fail_pushes:   AtomicBool,
    fail_resets:   AtomicBool,
    pushes:        Mutex<Vec<Coordinate>>,
    push_attempts: AtomicUsize,
    resets:        AtomicUsize,
    simulating:    AtomicBool,
}

impl MemoryDevice {
    pub fn new(udid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            udid:          udid.into(),
            name:          name.into(),
            connection:    ConnectionType::UNKNOWN,
            latency:       Mutex::new(Duration::ZERO),
            fail_pushes:   AtomicBool::new(false),
            fail_resets:   AtomicBool::new(false),
            pushes:        Mutex::new(Vec::new()),
            push_attempts: AtomicUsize::new(0),
            resets:        AtomicUsize::new(0),
            simulating:    AtomicBool::new(false),
        }
    }

    pub fn with_connection(mut self, connection: ConnectionType) -> Self {
        self.connection = connection;
        self
    }

    /// Block every capability call for `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = latency;
    }

    pub fn set_fail_pushes(&self, fail: bool) {
        self.fail_pushes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_resets(&self, fail: bool) {
        self.fail_resets.store(fail, Ordering::SeqCst);
    }

    /// Successfully simulated locations, oldest first.
    pub fn pushed(&self) -> Vec<Coordinate> {
        self.pushes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_pushed(&self) -> Option<Coordinate> {
        self.pushes.lock().unwrap_or_else(|e| e.into_inner()).last().copied()
    }

    /// Number of `simulate_location` calls, successful or not.
    pub fn push_attempts(&self) -> usize {
        self.push_attempts.load(Ordering::SeqCst)
    }

    /// Number of successful `disable_simulation` calls.
    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    /// `true` between a successful push and the next successful reset.
    pub fn is_simulating(&self) -> bool {
        self.simulating.load(Ordering::SeqCst)
    }

    fn wait(&self) {
        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
    }
}

impl Device for MemoryDevice {
    fn udid(&self) -> &str {
        &self.udid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn connection_type(&self) -> ConnectionType {
        self.connection
    }

    fn simulate_location(&self, coordinate: Coordinate) -> bool {
        self.push_attempts.fetch_add(1, Ordering::SeqCst);
        self.wait();
        if self.fail_pushes.load(Ordering::SeqCst) {
            return false;
        }
        self.pushes.lock().unwrap_or_else(|e| e.into_inner()).push(coordinate);
        self.simulating.store(true, Ordering::SeqCst);
        true
    }

    fn disable_simulation(&self) -> bool {
        self.wait();
        if self.fail_resets.load(Ordering::SeqCst) {
            return false;
        }
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.simulating.store(false, Ordering::SeqCst);
        true
    }
}
