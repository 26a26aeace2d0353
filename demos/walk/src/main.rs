//! walk: drives an in-memory device through every movement mode.
//!
//! Places the device in central Berlin, takes a few manual steps, cycles
//! north-east on auto update, drives a short route to its end and finally
//! resets the device to its real location.
//!
//! Usage: `walk [config.json]` where the optional file holds a
//! `SpooferConfig`.  Set `RUST_LOG` to change verbosity.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ls_core::{Coordinate, MoveType};
use ls_device::{ConnectionType, Device, DeviceInfo, DeviceRegistry, MemoryDevice};
use ls_motion::{MoveState, NavigationRoute};
use ls_spoofer::{Spoofer, SpooferConfig, SpooferDelegate};

// ── Constants ─────────────────────────────────────────────────────────────────

const UDID:          &str     = "00008030-001A2B3C4D5E6F70";
const DEVICE_NAME:   &str     = "Demo iPhone";
const START:         (f64, f64) = (52.516_275, 13.377_704); // Brandenburger Tor
const MANUAL_STEPS:  usize    = 4;
const AUTO_RUN:      Duration = Duration::from_secs(3);
const ROUTE_SPEED:   f64      = 30.0;                        // m/s, so the route ends quickly
const ROUTE_TIMEOUT: Duration = Duration::from_secs(60);

// ── Delegate ──────────────────────────────────────────────────────────────────

struct LoggingDelegate;

impl SpooferDelegate for LoggingDelegate {
    fn did_change_location(&self, spoofer: &Spoofer, to: Option<Coordinate>) {
        match to {
            Some(at) => tracing::info!(
                "at {at}  total {:.1} m  heading {:.0}°",
                spoofer.total_distance(),
                spoofer.heading()
            ),
            None => tracing::info!("device back at its real location"),
        }
    }

    fn error_changing_location(&self, _spoofer: &Spoofer, to: Option<Coordinate>) {
        tracing::warn!("device refused location change to {to:?}");
    }

    fn did_change_move_state(&self, spoofer: &Spoofer, from: &MoveState) {
        tracing::info!("mode {from} → {}", spoofer.move_state());
    }

    fn did_change_move_type(&self, spoofer: &Spoofer, from: MoveType) {
        tracing::info!("move type {from} → {}", spoofer.move_type());
    }

    fn did_change_auto_update(&self, spoofer: &Spoofer, _from: bool) {
        tracing::info!(
            "auto update {}",
            if spoofer.is_auto_updating() { "on" } else { "off" }
        );
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &str) -> Result<SpooferConfig> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {path}"))?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

/// Wait for the in-flight push, if any, to complete.
async fn settle(spoofer: &Spoofer) {
    while spoofer.has_pending_task() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "walk=info,ls_spoofer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => SpooferConfig::default(),
    };
    tracing::info!("config: {}", serde_json::to_string(&config)?);

    // 1. Discover the device.
    let mut registry = DeviceRegistry::new();
    registry.attach(DeviceInfo::new(UDID, DEVICE_NAME, ConnectionType::USB))?;
    for info in registry.devices() {
        tracing::info!("found {}", serde_json::to_string(info)?);
    }

    let device =
        Arc::new(MemoryDevice::new(UDID, DEVICE_NAME).with_connection(ConnectionType::USB));
    let delegate = Arc::new(LoggingDelegate);
    let spoofer = Spoofer::builder(Arc::clone(&device) as Arc<dyn Device>)
        .config(config)
        .delegate(&delegate)
        .build()?;

    // 2. Manual: jump to the start, then walk a square.
    let start = Coordinate::new(START.0, START.1);
    spoofer.set_location(start);
    settle(&spoofer).await;
    for i in 0..MANUAL_STEPS {
        spoofer.set_heading(90.0 * i as f64);
        spoofer.step()?;
        settle(&spoofer).await;
    }

    // 3. Auto: cycle north-east for a while.
    spoofer.set_move_state(MoveState::Auto);
    spoofer.set_move_type(MoveType::Cycle);
    spoofer.set_speed(MoveType::Cycle.speed());
    spoofer.set_heading(45.0);
    if !spoofer.start_auto_update() {
        anyhow::bail!("auto update refused to start");
    }
    tokio::time::sleep(AUTO_RUN).await;
    spoofer.stop_auto_update();
    settle(&spoofer).await;

    // 4. Navigation: drive a short loop back to the start.
    let here = spoofer.current_location().context("no location after auto mode")?;
    let route = NavigationRoute::new(vec![
        here,
        here.destination(60.0, 90.0),
        here.destination(60.0, 90.0).destination(60.0, 180.0),
        start,
    ]);
    spoofer.set_move_state(MoveState::Navigating(route));
    spoofer.set_move_type(MoveType::Drive);
    spoofer.set_speed(ROUTE_SPEED);

    let t0 = Instant::now();
    spoofer.start_auto_update();
    tokio::time::timeout(ROUTE_TIMEOUT, async {
        while spoofer.is_auto_updating() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .context("route did not finish in time")?;
    settle(&spoofer).await;
    tracing::info!("route finished in {:.1} s", t0.elapsed().as_secs_f64());

    // 5. Summary, then hand the real location back.
    let total = spoofer.total_distance();
    let pushes = device.pushed().len();
    spoofer.reset_location();
    while spoofer.current_location().is_some() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    println!();
    println!("{:<18} {}", "Device", ls_device::describe(device.as_ref()));
    println!("{:<18} {pushes}", "Locations pushed");
    println!("{:<18} {total:.1} m", "Distance");
    println!("{:<18} {:?}", "Final location", spoofer.current_location());

    Ok(())
}
