//! CPU implementation of the dot-product reduction.

use crate::error::Result;
use crate::ops::{validate_pair, DotConfig, DotOps};
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::vector::Vector;

/// DotOps implementation for the CPU runtime.
impl DotOps<CpuRuntime> for CpuClient {
    fn dot_with(
        &self,
        a: &Vector<CpuRuntime>,
        b: &Vector<CpuRuntime>,
        config: &DotConfig,
    ) -> Result<f64> {
        validate_pair(a, b)?;
        config.validate()?;

        if a.is_empty() {
            return Ok(0.0);
        }

        let lhs = unsafe { std::slice::from_raw_parts(a.ptr() as *const f64, a.len()) };
        let rhs = unsafe { std::slice::from_raw_parts(b.ptr() as *const f64, b.len()) };

        Ok(kernels::dot_f64(lhs, rhs))
    }
}
