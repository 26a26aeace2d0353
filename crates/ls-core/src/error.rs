//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own error enum via
//! `#[from]`, so configuration and parse failures surface unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown move type {0:?} (expected walk, cycle or drive)")]
    UnknownMoveType(String),

    #[error("{what} range {start}..{end} is empty or not finite")]
    InvalidRange {
        what:  &'static str,
        start: f64,
        end:   f64,
    },
}

/// Shorthand result type for `ls-core`.
pub type CoreResult<T> = Result<T, CoreError>;
