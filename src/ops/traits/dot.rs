//! Dot-product reduction trait.

use crate::error::Result;
use crate::ops::DotConfig;
use crate::runtime::Runtime;
use crate::vector::Vector;

/// Dot-product reduction over device vectors.
pub trait DotOps<R: Runtime> {
    /// Computes `sum(a[k] * b[k])` over two equally sized vectors.
    ///
    /// Returns exactly `0.0` for empty inputs. Operands are validated before
    /// any device work: mismatched lengths fail with `Error::LengthMismatch`
    /// and vectors on different devices fail with `Error::DeviceMismatch`.
    ///
    /// The summation order is unspecified, so results across backends (or
    /// across launch configurations) agree to floating-point tolerance, not
    /// bitwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use dotr::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let a = Vector::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0, 4.0], &device)?;
    /// let b = Vector::<CpuRuntime>::from_slice(&[4.0, 3.0, 2.0, 1.0], &device)?;
    /// assert_eq!(client.dot(&a, &b)?, 20.0);
    /// # Ok::<(), dotr::error::Error>(())
    /// ```
    fn dot(&self, a: &Vector<R>, b: &Vector<R>) -> Result<f64> {
        self.dot_with(a, b, &DotConfig::default())
    }

    /// Computes the dot product with an explicit launch configuration.
    ///
    /// The configuration is validated first; see [`DotConfig::validate`].
    /// Backends without a launch grid (CPU) accept and ignore it.
    fn dot_with(&self, a: &Vector<R>, b: &Vector<R>, config: &DotConfig) -> Result<f64>;
}
