//! `Scheduler`: single-slot delayed task with cancellation.
//!
//! The auto-update loop re-arms itself after every successful push.  A stale
//! timer left running after a reschedule would fire a second, overlapping
//! loop, so the scheduler keeps exactly one slot: arming a new task always
//! cancels the previous one first.
//!
//! ```text
//!   schedule(a) ──► slot = A          (A armed)
//!   schedule(b) ──► cancel A; slot = B
//!   cancel_pending() ──► cancel B; slot empty
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Handle to one scheduled task.
///
/// Clones refer to the same task.  The task receives its own token when it
/// fires so it can re-check cancellation after hopping to another context.
#[derive(Clone, Debug)]
pub struct CancelToken {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl CancelToken {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `true` once the delay elapsed and the task was started.
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Armed and neither fired nor cancelled.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.is_cancelled() && !self.has_fired()
    }

    fn cancel(&self) {
        self.token.cancel();
    }

    fn same_task(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.fired, &other.fired)
    }
}

pub struct Scheduler {
    runtime: Handle,
    slot:    Mutex<Option<CancelToken>>,
}

impl Scheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime, slot: Mutex::new(None) }
    }

    /// Run `task` after `after`, replacing (and cancelling) whatever was
    /// scheduled before.
    pub fn schedule<F>(&self, after: Duration, task: F) -> CancelToken
    where
        F: FnOnce(CancelToken) + Send + 'static,
    {
        let token = CancelToken::new();
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(token.clone()) {
            if previous.is_pending() {
                tracing::trace!("cancelling previously scheduled update");
            }
            previous.cancel();
        }

        let armed = token.clone();
        let cancelled = token.token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    if !armed.is_cancelled() {
                        armed.fired.store(true, Ordering::SeqCst);
                        task(armed);
                    }
                }
            }
        });
        token
    }

    /// Cancel `token`; clears the slot if it still holds that task.
    pub fn cancel(&self, token: &CancelToken) {
        token.cancel();
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|t| t.same_task(token)) {
            *slot = None;
        }
    }

    /// Cancel whatever is scheduled.  Returns `true` if a task was still
    /// waiting to fire.
    pub fn cancel_pending(&self) -> bool {
        let taken = self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        match taken {
            Some(token) => {
                let was_pending = token.is_pending();
                token.cancel();
                was_pending
            }
            None => false,
        }
    }

    /// `true` while a scheduled task is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(CancelToken::is_pending)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("has_pending", &self.has_pending())
            .finish()
    }
}
