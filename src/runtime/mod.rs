//! Runtime backends for the dot-product reduction
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the CPU reference backend and CUDA.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── Client (dispatches operations, owns stream)
//! ├── Allocator (memory management)
//! └── RawHandle (escape hatch for custom kernels)
//! ```

mod allocator;
pub mod traits;

pub mod cpu;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use allocator::{Allocator, DefaultAllocator};
pub use traits::{Device, Runtime, RuntimeClient};
