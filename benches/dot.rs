//! Benchmarks for the dot-product reduction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dotr::ops::DotOps;
use dotr::runtime::cpu::{CpuDevice, CpuRuntime};
use dotr::runtime::Runtime;
use dotr::vector::Vector;

fn bench_vec(n: usize, seed: usize) -> Vec<f64> {
    (0..n)
        .map(|i| ((i * 17 + seed * 31 + 3) % 1000 + 1) as f64 / 1000.0)
        .collect()
}

fn bench_cpu_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_f64_cpu");

    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);

    for size in [1_000, 100_000, 1_000_000, 10_000_000] {
        let a = Vector::<CpuRuntime>::from_slice(&bench_vec(size, 1), &device).unwrap();
        let b = Vector::<CpuRuntime>::from_slice(&bench_vec(size, 2), &device).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(client.dot(black_box(&a), black_box(&b)).unwrap()))
        });
    }

    group.finish();
}

#[cfg(feature = "cuda")]
fn bench_cuda_dot(c: &mut Criterion) {
    use dotr::runtime::cuda::{is_cuda_available, CudaDevice, CudaRuntime};

    if !is_cuda_available() {
        return;
    }

    let mut group = c.benchmark_group("dot_f64_cuda");

    let device = CudaDevice::new(0);
    let client = CudaRuntime::default_client(&device);

    for size in [100_000, 1_000_000, 10_000_000] {
        let a = Vector::<CudaRuntime>::from_slice(&bench_vec(size, 1), &device).unwrap();
        let b = Vector::<CudaRuntime>::from_slice(&bench_vec(size, 2), &device).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(client.dot(black_box(&a), black_box(&b)).unwrap()))
        });
    }

    group.finish();
}

/// Fallback so the group list stays the same without the cuda feature
#[cfg(not(feature = "cuda"))]
fn bench_cuda_dot(_c: &mut Criterion) {}

criterion_group!(benches, bench_cpu_dot, bench_cuda_dot);
criterion_main!(benches);
