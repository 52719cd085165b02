//! # dotr
//!
//! **Double-precision dot-product reduction with a CUDA backend and a
//! parallel CPU reference.**
//!
//! dotr computes `sum(a[k] * b[k])` over device-resident f64 vectors. The
//! CUDA path reduces in three stages: grid-strided per-thread partial sums,
//! an intra-warp shuffle butterfly, and one atomic add per warp into a single
//! accumulator cell. The CPU path is a rayon-chunked reference used for
//! testing and for machines without a GPU.
//!
//! ## Why dotr?
//!
//! - **Native kernel**: the reduction is a single compiled PTX kernel, not a
//!   cuBLAS wrapper
//! - **Same API on both backends**: `DotOps` is implemented by each runtime's
//!   client, so code written against the trait runs anywhere
//! - **Validated launches**: operand and configuration errors surface as
//!   `Result` before any device work
//!
//! ## Quick Start
//!
//! ```
//! use dotr::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let a = Vector::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0, 4.0], &device)?;
//! let b = Vector::<CpuRuntime>::from_slice(&[4.0, 3.0, 2.0, 1.0], &device)?;
//!
//! assert_eq!(client.dot(&a, &b)?, 20.0);
//! # Ok::<(), dotr::error::Error>(())
//! ```
//!
//! With the `cuda` feature the same calls run on the GPU:
//!
//! ```rust,ignore
//! use dotr::prelude::*;
//! use dotr::runtime::cuda::cuda_device;
//!
//! let device = cuda_device();
//! let client = CudaRuntime::default_client(&device);
//! let result = client.dot(&a, &b)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded CPU reduction
//! - `cuda`: NVIDIA CUDA backend (requires nvcc at build time)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ops;
pub mod runtime;
pub mod vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::ops::{DotConfig, DotOps};
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::vector::Vector;

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
}

/// Default runtime based on enabled features
///
/// - With `cuda` feature: `CudaRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "cuda")]
pub type DefaultRuntime = runtime::cuda::CudaRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "cuda"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
