//! Error type shared by the progress bar, group and writer.

use thiserror::Error;

/// Errors surfaced by bar construction, updates and terminal writes.
#[derive(Error, Debug)]
pub enum Error {
    /// An update supplied both a relative and an absolute count.
    #[error("update cannot set both delta ({delta}) and absolute count ({absolute})")]
    ConflictingUpdate { delta: i64, absolute: u64 },

    /// Applying a delta would move the count outside `0..=u64::MAX`.
    #[error("count {count} cannot be adjusted by {delta}")]
    CountOutOfRange { count: u64, delta: i64 },

    #[error("bar width must be positive")]
    InvalidWidth,

    #[error("no bar with id {0} in this group")]
    UnknownBar(usize),

    /// A dotted path ran into a scalar, or indexed an array with a non-number.
    #[error("cannot follow segment '{segment}' of path '{path}'")]
    InvalidPath { path: String, segment: String },

    /// The terminal stream rejected a write or flush. Not retried.
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
