//! Fluent builder for constructing a [`Spoofer`].

use std::sync::{Arc, Mutex, RwLock, Weak};

use ls_core::MotionRng;
use ls_device::{Device, describe};
use ls_motion::MoveState;
use tokio::runtime::Handle;

use crate::context::{NotificationContext, WorkerContext};
use crate::spoofer::{Shared, SpooferState};
use crate::{Scheduler, Spoofer, SpooferConfig, SpooferDelegate, SpooferError, SpooferResult};

/// Fluent builder for [`Spoofer`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                              |
/// |------------------|--------------------------------------|
/// | `.config(c)`     | `SpooferConfig::default()`           |
/// | `.runtime(h)`    | `Handle::try_current()` at `build()` |
/// | `.delegate(d)`   | none                                 |
///
/// # Example
///
/// ```rust,ignore
/// let device: Arc<dyn Device> = Arc::new(MemoryDevice::new("0000-1111", "Test phone"));
/// let spoofer = Spoofer::builder(device)
///     .config(config)
///     .delegate(&printer)
///     .build()?;
/// spoofer.set_location(Coordinate::new(52.52, 13.405));
/// ```
pub struct SpooferBuilder {
    device:   Arc<dyn Device>,
    config:   SpooferConfig,
    runtime:  Option<Handle>,
    delegate: Option<Weak<dyn SpooferDelegate>>,
}

impl SpooferBuilder {
    pub fn new(device: Arc<dyn Device>) -> Self {
        Self {
            device,
            config:   SpooferConfig::default(),
            runtime:  None,
            delegate: None,
        }
    }

    pub fn config(mut self, config: SpooferConfig) -> Self {
        self.config = config;
        self
    }

    /// Drive the spoofer on `runtime` instead of the ambient one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Register a delegate.  Only a weak reference is kept.
    pub fn delegate<D: SpooferDelegate + 'static>(mut self, delegate: &Arc<D>) -> Self {
        self.delegate = Some(Arc::downgrade(delegate) as Weak<dyn SpooferDelegate>);
        self
    }

    /// Validate the configuration and start the worker and notification tasks.
    ///
    /// # Errors
    ///
    /// - [`SpooferError::Config`] if a configured range or speed is invalid.
    /// - [`SpooferError::NoRuntime`] if no runtime was given and `build` is not
    ///   called from within a tokio runtime.
    pub fn build(self) -> SpooferResult<Spoofer> {
        self.config.validate()?;

        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| SpooferError::NoRuntime)?,
        };

        let config = self.config;
        let state = SpooferState {
            current_location:        None,
            real_current_location:   None,
            total_distance:          0.0,
            heading:                 config.heading,
            speed:                   config.initial_speed(),
            movement_speed_variance: config.movement_speed_variance.clone(),
            move_type:               config.move_type,
            move_state:              MoveState::Manual,
            is_auto_updating:        false,
            pending_pushes:          0,
            rng:                     MotionRng::from_seed_or_entropy(config.seed),
        };

        let worker = WorkerContext::spawn(&runtime);
        let (notifier, inbox) = NotificationContext::channel();
        let shared = Arc::new(Shared {
            device:    self.device,
            profile:   config.profile,
            state:     Mutex::new(state),
            delegate:  RwLock::new(self.delegate),
            worker,
            notifier,
            scheduler: Scheduler::new(runtime.clone()),
        });
        inbox.spawn(&runtime, Arc::downgrade(&shared));

        tracing::debug!(
            device = %describe(shared.device.as_ref()),
            move_type = %config.move_type,
            "spoofer ready"
        );
        Ok(Spoofer::from_shared(shared))
    }
}
