//! CUDA kernel implementation for the dot-product reduction
//!
//! # Architecture
//!
//! The kernel is written in CUDA C (`dot.cu`) and compiled to PTX by build.rs.
//! The PTX is loaded at runtime and cached per-device for efficient reuse.
//!
//! # Module Organization
//!
//! - `loader` - Kernel loading, caching, and launch configuration
//! - `dot` - Launcher for the `dot_f64` kernel
//!
//! # Kernel Files
//!
//! - `dot.cu` - Grid-strided partial sums, warp shuffle butterfly, one
//!   atomicAdd per warp

mod dot;
mod loader;

pub use dot::launch_dot_f64;
