//! Error types for timeallocator operations.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while allocating, booking or searching time.
#[derive(Error, Debug)]
pub enum AllocatorError {
    #[error("Start time must be before end time (got {from} - {to})")]
    InvalidInterval {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },

    #[error("There is already time allocated to this interval")]
    OverlapConflict,

    #[error("Cannot split by an interval outside of the time slot")]
    OutOfBounds,

    #[error("Cannot split a time slot that already has an appointment assigned to")]
    AlreadyBooked,

    #[error("There is no allocated time for this appointment")]
    NoAllocatedTime,

    #[error("Unknown {kind} ID: {id}")]
    UnknownReference { kind: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AllocatorError {
    pub(crate) fn unknown(kind: &'static str, id: impl ToString) -> Self {
        AllocatorError::UnknownReference {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result type alias for timeallocator operations.
pub type AllocatorResult<T> = Result<T, AllocatorError>;

/// Fail with `InvalidInterval` unless `to` is strictly after `from`.
pub(crate) fn check_interval(from: NaiveDateTime, to: NaiveDateTime) -> AllocatorResult<()> {
    if to <= from {
        return Err(AllocatorError::InvalidInterval { from, to });
    }
    Ok(())
}
