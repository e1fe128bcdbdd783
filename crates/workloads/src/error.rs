// Error types for workload execution

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias for workload operations
pub type Result<T> = std::result::Result<T, WorkloadError>;

/// Errors that can occur while running a workload
///
/// Generators never retry and never return partial results; any of these
/// ends the invocation and is handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Sizing arithmetic does not fit in the platform's address space
    #[error("{parameter}={value} is too large to size a workload")]
    SizeOverflow { parameter: &'static str, value: u64 },

    /// The allocator refused the requested buffer
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// JSON encoding or decoding failed during the round trip
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decoded document does not contain the number of items that was encoded
    #[error("round trip lost items: expected {expected}, got {actual}")]
    RoundTripMismatch { expected: usize, actual: usize },

    /// A spawned task panicked or was cancelled before completing
    #[error("task failed to complete: {0}")]
    TaskJoin(String),
}

impl WorkloadError {
    /// Create a size overflow error
    pub fn size_overflow(parameter: &'static str, value: u64) -> Self {
        WorkloadError::SizeOverflow { parameter, value }
    }
}
