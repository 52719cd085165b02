//! Dot-product CUDA kernel launcher

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{dot_launch_config, get_kernel_function, get_or_load_module, kernel_names};
use crate::error::{Error, Result};
use crate::ops::DotConfig;

/// Launch the `dot_f64` reduction kernel.
///
/// The kernel accumulates into `out_ptr` with one atomic add per warp, so
/// the cell must hold 0.0 when the kernel starts. Callers enqueue the
/// zeroing copy on `stream` before calling this; no extra fence is needed.
///
/// `warp_width` is the device-reported warp size. Block sizes that are not
/// a multiple of it would leave partial warps behind the kernel's full-mask
/// shuffle, so those configurations are rejected before launch.
///
/// # Safety
///
/// - `a_ptr` and `b_ptr` must be valid device memory holding at least `numel` f64 elements
/// - `out_ptr` must point to one writable f64 cell on the same device
/// - All three must belong to the device behind `context`/`stream`
pub unsafe fn launch_dot_f64(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    warp_width: u32,
    a_ptr: u64,
    b_ptr: u64,
    out_ptr: u64,
    numel: usize,
    config: &DotConfig,
) -> Result<()> {
    if warp_width == 0 || config.threads_per_block % warp_width != 0 {
        return Err(Error::invalid_argument(
            "threads_per_block",
            format!(
                "{} is not a multiple of the device warp width {}",
                config.threads_per_block, warp_width
            ),
        ));
    }

    unsafe {
        let module = get_or_load_module(context, device_index, kernel_names::DOT_MODULE)?;
        let func = get_kernel_function(&module, "dot_f64")?;

        let cfg = dot_launch_config(numel, config);
        let n = numel as i64;

        let mut builder = stream.launch_builder(&func);
        builder.arg(&a_ptr);
        builder.arg(&b_ptr);
        builder.arg(&out_ptr);
        builder.arg(&n);

        builder
            .launch(cfg)
            .map_err(|e| Error::Internal(format!("CUDA dot kernel launch failed: {:?}", e)))?;
    }

    Ok(())
}
