//! CPU kernels for the dot-product reduction
//!
//! Performance characteristics:
//! - Parallelization threshold: 4096 elements
//! - Chunked partial sums: each chunk accumulates sequentially, chunk totals
//!   combine in unspecified order
//! - Memory bandwidth bound (two streaming reads per multiply-add)

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small inputs (overhead > benefit)
const PARALLEL_THRESHOLD: usize = 4096;

/// Sum of element-wise products: `sum(a[k] * b[k])`
///
/// Above the parallel threshold the accumulation order is unspecified, so
/// results match the serial sum only within floating-point reordering error,
/// never bitwise.
pub fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    #[cfg(feature = "rayon")]
    if a.len() >= PARALLEL_THRESHOLD {
        const CHUNK_SIZE: usize = 4096;
        return a
            .par_chunks(CHUNK_SIZE)
            .zip(b.par_chunks(CHUNK_SIZE))
            .map(|(a_chunk, b_chunk)| {
                a_chunk
                    .iter()
                    .zip(b_chunk)
                    .map(|(x, y)| x * y)
                    .sum::<f64>()
            })
            .sum();
    }

    // Serial fallback for small inputs
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_f64_small_exact() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(dot_f64(&a, &b), 32.0);
    }

    #[test]
    fn test_dot_f64_empty() {
        assert_eq!(dot_f64(&[], &[]), 0.0);
    }

    #[test]
    fn test_dot_f64_single() {
        assert_eq!(dot_f64(&[1.5], &[-2.25]), -3.375);
    }

    #[test]
    fn test_dot_f64_mixed_signs() {
        let a = [1.0, -2.0, 3.0, -4.0];
        let b = [-1.0, 2.0, -3.0, 4.0];
        assert_eq!(dot_f64(&a, &b), -30.0);
    }

    #[test]
    fn test_dot_f64_across_parallel_threshold() {
        // Integer-valued products sum exactly in f64 regardless of order,
        // so the serial and chunked paths must agree bitwise here.
        for n in [
            PARALLEL_THRESHOLD - 1,
            PARALLEL_THRESHOLD,
            PARALLEL_THRESHOLD + 1,
            3 * PARALLEL_THRESHOLD + 7,
        ] {
            let a: Vec<f64> = (0..n).map(|i| (i % 31) as f64).collect();
            let b: Vec<f64> = (0..n).map(|i| (i % 17) as f64).collect();
            let serial: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
            assert_eq!(dot_f64(&a, &b), serial, "n={}", n);
        }
    }
}
