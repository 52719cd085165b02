//! Dot-product reduction for the CUDA runtime.

use crate::error::{Error, Result};
use crate::ops::{validate_pair, DotConfig, DotOps};
use crate::runtime::cuda::kernels::launch_dot_f64;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::vector::Vector;

impl DotOps<CudaRuntime> for CudaClient {
    fn dot_with(
        &self,
        a: &Vector<CudaRuntime>,
        b: &Vector<CudaRuntime>,
        config: &DotConfig,
    ) -> Result<f64> {
        validate_pair(a, b)?;
        config.validate()?;

        if a.is_empty() {
            return Ok(0.0);
        }

        let warp_width = self
            .device
            .warp_size()
            .map_err(|e| Error::Backend(e.to_string()))?;

        // One accumulator cell, zeroed on the host side. The kernel only
        // accumulates into it, so a fresh cell per call keeps repeated calls
        // independent.
        let out = Vector::<CudaRuntime>::zeros(1, &self.device)?;

        unsafe {
            launch_dot_f64(
                self.context(),
                self.stream(),
                self.device.index,
                warp_width,
                a.ptr(),
                b.ptr(),
                out.ptr(),
                a.len(),
                config,
            )?;
        }

        // The read-back below goes through a stream-synchronizing copy, but
        // surfacing kernel-execution errors belongs here, not in the copy.
        self.stream().synchronize()?;

        Ok(out.to_vec()?[0])
    }
}
