//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and serves as the reference
//! backend: it is always compiled, needs no driver, and its results are what
//! the CUDA backend is checked against.
//!
//! # Parallelism
//!
//! With the `rayon` feature (on by default) the reduction splits the input
//! into fixed-size chunks and sums them on the thread pool. Small inputs stay
//! on the calling thread.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
