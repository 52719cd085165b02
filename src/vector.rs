//! Vector: device memory management with Arc-based sharing

use crate::error::Result;
use crate::runtime::Runtime;
use std::sync::Arc;

/// Size of one element in bytes
const ELEM_SIZE: usize = std::mem::size_of::<f64>();

/// A one-dimensional f64 buffer on a device
///
/// `Vector` wraps device memory with reference counting, so clones share the
/// underlying buffer and the last reference dropped deallocates it. Both
/// reduction operands and the one-element accumulator cell live in this type.
pub struct Vector<R: Runtime> {
    inner: Arc<VectorInner<R>>,
}

struct VectorInner<R: Runtime> {
    /// Raw device pointer (GPU address or CPU ptr cast to u64)
    ptr: u64,
    /// Number of f64 elements (not bytes)
    len: usize,
    /// Device where memory is allocated
    device: R::Device,
}

impl<R: Runtime> Vector<R> {
    /// Create a vector by copying `data` to the device
    pub fn from_slice(data: &[f64], device: &R::Device) -> Result<Self> {
        let bytes = bytemuck::cast_slice(data);
        let ptr = R::allocate(bytes.len(), device)?;

        R::copy_to_device(bytes, ptr, device)?;

        Ok(Self {
            inner: Arc::new(VectorInner {
                ptr,
                len: data.len(),
                device: device.clone(),
            }),
        })
    }

    /// Create a vector of `len` elements holding 0.0
    ///
    /// The zeros are written with an explicit host-to-device copy, so on
    /// stream-ordered backends the cleared state is sequenced before any
    /// kernel enqueued afterwards on the same stream.
    pub fn zeros(len: usize, device: &R::Device) -> Result<Self> {
        Self::from_slice(&vec![0.0; len], device)
    }

    /// Get the raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if the vector is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * ELEM_SIZE
    }

    /// Copy the contents back to the host
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        // Allocate f64s and cast to bytes for the copy. Allocating a Vec<u8>
        // and casting the other way could violate f64 alignment.
        let mut result = vec![0.0f64; self.inner.len];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        R::copy_from_device(self.inner.ptr, bytes, &self.inner.device)?;
        Ok(result)
    }
}

impl<R: Runtime> Clone for Vector<R> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> Drop for VectorInner<R> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            R::deallocate(self.ptr, self.len * ELEM_SIZE, &self.device);
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("len", &self.inner.len)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

// Vector tests live in tests/ (they require a concrete runtime implementation)
