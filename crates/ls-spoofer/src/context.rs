//! The two ordered execution contexts behind a spoofer.
//!
//! ```text
//!   caller ──► WorkerContext ──► Device::simulate_location / disable_simulation
//!                   │                 (blocking, strictly one at a time)
//!                   ▼
//!            NotificationContext ──► SpooferDelegate callbacks, push completions
//! ```
//!
//! Both are a tokio task draining an unbounded channel, so submitting work
//! never blocks the caller and jobs run in submission order.  Device calls run
//! on the blocking pool; the worker awaits each one before taking the next
//! job, which keeps device I/O serialized.  Delegate callbacks therefore never
//! wait on device I/O.

use std::sync::Weak;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::spoofer::Shared;
use crate::{Notification, Spoofer};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Serial queue for device I/O and auto-update ticks.
pub(crate) struct WorkerContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl WorkerContext {
    pub(crate) fn spawn(runtime: &Handle) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        runtime.spawn(async move {
            while let Some(job) = rx.recv().await {
                if let Err(e) = tokio::task::spawn_blocking(job).await {
                    tracing::error!("location worker job failed: {e}");
                }
            }
            tracing::trace!("location worker stopped");
        });
        Self { tx }
    }

    pub(crate) fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            tracing::warn!("location worker has shut down; dropping job");
        }
    }
}

pub(crate) enum Dispatch {
    Notify(Notification),
    Run(Box<dyn FnOnce(&Spoofer) + Send + 'static>),
}

/// Serial queue for delegate callbacks.
pub(crate) struct NotificationContext {
    tx: mpsc::UnboundedSender<Dispatch>,
}

/// Receiving half, started once the shared state exists.
pub(crate) struct NotificationInbox {
    rx: mpsc::UnboundedReceiver<Dispatch>,
}

impl NotificationContext {
    pub(crate) fn channel() -> (Self, NotificationInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, NotificationInbox { rx })
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.send(Dispatch::Notify(notification));
    }

    /// Run `f` on the notification context, after everything queued so far.
    pub(crate) fn run<F>(&self, f: F)
    where
        F: FnOnce(&Spoofer) + Send + 'static,
    {
        self.send(Dispatch::Run(Box::new(f)));
    }

    fn send(&self, dispatch: Dispatch) {
        // Only fails while the spoofer is being torn down.
        let _ = self.tx.send(dispatch);
    }
}

impl NotificationInbox {
    /// Start delivering.  Holds only a weak reference so the loop never keeps
    /// the spoofer alive; it ends when the last sender is dropped.
    pub(crate) fn spawn(mut self, runtime: &Handle, shared: Weak<Shared>) {
        runtime.spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                let Some(shared) = shared.upgrade() else { break };
                let spoofer = Spoofer::from_shared(shared);
                match dispatch {
                    Dispatch::Notify(notification) => spoofer.deliver(&notification),
                    Dispatch::Run(f) => f(&spoofer),
                }
            }
        });
    }
}
