//! Vector operations
//!
//! This module defines the operation traits and their backend implementations.
//!
//! # Design
//!
//! Operations are traits implemented by each backend's `RuntimeClient`. This
//! gives an operation access to the device, stream, and allocator it needs
//! for staging buffers and launching kernels.
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements DotOps<R>
//!         ├── dot       (default launch configuration)
//!         └── dot_with  (explicit DotConfig)
//! ```
//!
//! Operands are validated before any device work: lengths must match and
//! both vectors must live on the same device.

mod dot;
pub mod traits;

mod cpu;
#[cfg(feature = "cuda")]
mod cuda;

pub use dot::{DotConfig, DEFAULT_MAX_GRID_BLOCKS, DEFAULT_THREADS_PER_BLOCK};
pub use traits::DotOps;

use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use crate::vector::Vector;

/// Checks that two operands can be reduced together.
pub(crate) fn validate_pair<R: Runtime>(a: &Vector<R>, b: &Vector<R>) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::length_mismatch(a.len(), b.len()));
    }
    if !a.device().is_same(b.device()) {
        return Err(Error::DeviceMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_validate_pair_accepts_equal_lengths() {
        let device = CpuDevice::new();
        let a = Vector::<CpuRuntime>::from_slice(&[1.0, 2.0], &device).unwrap();
        let b = Vector::<CpuRuntime>::from_slice(&[3.0, 4.0], &device).unwrap();
        assert!(validate_pair(&a, &b).is_ok());
    }

    #[test]
    fn test_validate_pair_rejects_length_mismatch() {
        let device = CpuDevice::new();
        let a = Vector::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0], &device).unwrap();
        let b = Vector::<CpuRuntime>::from_slice(&[1.0], &device).unwrap();
        let err = validate_pair(&a, &b).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { lhs: 3, rhs: 1 }));
    }
}
