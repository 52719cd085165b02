//! Common test utilities
#![allow(dead_code)]

use dotr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use dotr::runtime::Runtime;
#[cfg(feature = "cuda")]
use dotr::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a CUDA client and device, returning None if CUDA is unavailable
#[cfg(feature = "cuda")]
pub fn create_cuda_client() -> Option<(CudaClient, CudaDevice)> {
    if !dotr::runtime::cuda::is_cuda_available() {
        return None;
    }
    let init = std::panic::catch_unwind(|| {
        let device = CudaDevice::new(0);
        let client = CudaRuntime::default_client(&device);
        (client, device)
    });
    init.ok()
}

/// Assert two scalars are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_close_f64(actual: f64, expected: f64, rtol: f64, atol: f64, msg: &str) {
    let diff = (actual - expected).abs();
    let tol = atol + rtol * expected.abs();
    assert!(
        diff <= tol,
        "{}: {} vs {} (diff={:.2e}, tol={:.2e})",
        msg,
        actual,
        expected,
        diff,
        tol
    );
}

/// Deterministic positive test data in (0, 1]
///
/// Strictly positive values keep every partial sum positive, so relative
/// tolerance comparisons stay meaningful regardless of summation order.
pub fn test_vec(n: usize, seed: usize) -> Vec<f64> {
    (0..n)
        .map(|i| ((i * 17 + seed * 31 + 3) % 1000 + 1) as f64 / 1000.0)
        .collect()
}

/// Deterministic signed test data in (-0.5, 0.5]
///
/// Sums over this data sit near zero, so comparisons need an absolute
/// tolerance rather than a relative one.
pub fn signed_vec(n: usize, seed: usize) -> Vec<f64> {
    test_vec(n, seed).into_iter().map(|x| x - 0.5).collect()
}

/// Sequential reference dot product
pub fn dot_reference(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
