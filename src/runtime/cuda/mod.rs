//! CUDA runtime implementation
//!
//! This module provides GPU acceleration via NVIDIA CUDA using cudarc.
//!
//! # Features
//!
//! - `CudaDevice` - Represents a CUDA GPU device
//! - `CudaClient` - Manages GPU stream and context, launches kernels
//! - `CudaRuntime` - Implements the generic Runtime trait
//! - The `DotOps` implementation launches the `dot_f64` reduction kernel
//!
//! # Panics
//!
//! `Allocator::allocate` on the client allocator panics if CUDA memory
//! allocation fails. The fallible path is `Runtime::allocate`, which retries
//! after a stream sync and a client reset before returning `OutOfMemory`.

mod cache;
mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CudaAllocator, CudaClient, CudaRawHandle};
pub use device::{CudaDevice, CudaError};
pub use runtime::{CudaRuntime, cuda_device, cuda_device_id, is_cuda_available};

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Allocator, Device, Runtime, RuntimeClient};

    #[test]
    fn test_cuda_device_creation() {
        let device = CudaDevice::new(0);
        assert_eq!(device.id(), 0);
        assert_eq!(device.name(), "cuda:0");
    }

    #[test]
    fn test_cuda_allocate_deallocate() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        let ptr = CudaRuntime::allocate(1024, &device).expect("allocation failed");
        assert_ne!(ptr, 0);
        CudaRuntime::deallocate(ptr, 1024, &device);
    }

    #[test]
    fn test_cuda_copy_roundtrip() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8];

        let ptr = CudaRuntime::allocate(data.len(), &device).expect("allocation failed");
        CudaRuntime::copy_to_device(&data, ptr, &device).expect("copy to device failed");

        let mut result = vec![0u8; data.len()];
        CudaRuntime::copy_from_device(ptr, &mut result, &device).expect("copy from device failed");

        assert_eq!(data, result);

        CudaRuntime::deallocate(ptr, data.len(), &device);
    }

    #[test]
    fn test_cuda_client_creation() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        let client = CudaRuntime::default_client(&device);
        assert_eq!(client.device().id(), 0);
    }

    #[test]
    fn test_cuda_client_allocator() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        let client = CudaRuntime::default_client(&device);

        let ptr = client.allocator().allocate(256);
        assert_ne!(ptr, 0);
        client.allocator().deallocate(ptr, 256);
    }

    #[test]
    fn test_cuda_compute_capability() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        // Initialize CUDA context by getting the client
        let _client = CudaRuntime::default_client(&device);
        let (major, minor) = device
            .compute_capability()
            .expect("Failed to get compute capability");
        // Double-precision atomicAdd needs sm_60+
        assert!(
            major >= 6,
            "Expected compute capability >= 6.0, got {}.{}",
            major,
            minor
        );
    }

    #[test]
    fn test_cuda_warp_size() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        let _client = CudaRuntime::default_client(&device);
        let width = device.warp_size().expect("Failed to get warp size");
        // All shipped NVIDIA hardware reports 32
        assert_eq!(width, 32);
    }

    #[test]
    fn test_cuda_memory_info() {
        if !is_cuda_available() {
            println!("CUDA not available, skipping test");
            return;
        }

        let device = CudaDevice::new(0);
        // Initialize CUDA context by getting the client
        let client = CudaRuntime::default_client(&device);
        // Activate the context on this thread
        client
            .context
            .bind_to_thread()
            .expect("Failed to bind context");
        let (free, total) = device.memory_info().expect("Failed to get memory info");
        assert!(total > 0, "Total GPU memory should be > 0");
        assert!(free <= total, "Free memory should be <= total memory");
    }
}
