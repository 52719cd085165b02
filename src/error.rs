//! Error types for dotr

use thiserror::Error;

/// Result type alias using dotr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dotr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Operand vectors have different lengths
    #[error("Length mismatch: {lhs} vs {rhs}")]
    LengthMismatch {
        /// Left-hand side length
        lhs: usize,
        /// Right-hand side length
        rhs: usize,
    },

    /// Device mismatch between operands
    #[error("Device mismatch: vectors must be on the same device")]
    DeviceMismatch,

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// CUDA-specific error
    #[cfg(feature = "cuda")]
    #[error("CUDA error: {0}")]
    Cuda(#[from] cudarc::driver::DriverError),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a length mismatch error
    pub fn length_mismatch(lhs: usize, rhs: usize) -> Self {
        Self::LengthMismatch { lhs, rhs }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
