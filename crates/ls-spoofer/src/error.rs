use ls_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpooferError {
    /// A manual step was requested while a location push is still in flight.
    /// Retry once the pending push has completed.
    #[error("location queue is busy; wait until the pending update has finished")]
    QueueBusy,

    /// A manual step was requested while auto-updating in a mode that drives
    /// itself.
    #[error("interaction while auto updating is only possible in manual mode (current: {0})")]
    InteractionNotPossible(&'static str),

    #[error("no tokio runtime available to drive the spoofer")]
    NoRuntime,

    #[error("invalid configuration: {0}")]
    Config(#[from] CoreError),
}

pub type SpooferResult<T> = Result<T, SpooferError>;
