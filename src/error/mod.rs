//! Error types for fdlines.

use std::io;

use thiserror::Error;

use crate::source::Descriptor;

/// Errors that can occur while reading records.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The descriptor is negative or above the configured bound.
    #[error("invalid descriptor {descriptor}: {reason}")]
    InvalidArgument {
        /// The rejected descriptor.
        descriptor: Descriptor,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The descriptor buffer could not be allocated or grown.
    ///
    /// Bytes already buffered are kept; the record stream for this
    /// descriptor should be treated as aborted.
    #[error("allocation of {requested} bytes failed for descriptor {descriptor}")]
    AllocationFailure {
        /// The descriptor whose buffer failed to grow.
        descriptor: Descriptor,
        /// The capacity that was requested.
        requested: usize,
    },

    /// The raw read failed. The descriptor's buffered state has been released.
    #[error("read failed on descriptor {descriptor}: {source}")]
    ReadFailure {
        /// The descriptor that failed.
        descriptor: Descriptor,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl ReadError {
    /// Returns the descriptor this error refers to, if any.
    pub fn descriptor(&self) -> Option<Descriptor> {
        match self {
            ReadError::InvalidArgument { descriptor, .. }
            | ReadError::AllocationFailure { descriptor, .. }
            | ReadError::ReadFailure { descriptor, .. } => Some(*descriptor),
            ReadError::InvalidConfig { .. } => None,
        }
    }
}
