/*!
    Heap buffers with a caller-chosen alignment, for plane data that
    SIMD code reads with aligned loads.
*/

use std::{
    alloc::{self, Layout},
    fmt,
    ptr::NonNull,
    slice,
};

use crate::error::{Error, Result};

/**
    A zero-initialised, fixed-size byte buffer whose start address is a
    multiple of the requested alignment.

    The memory is released when the buffer is dropped.
*/
pub struct AlignedBuffer {
    ptr: NonNull<u8>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /**
        Allocate `size` bytes aligned to `alignment`.

        A `size` of zero still allocates one byte, so the returned pointer
        is always a real allocation. [`AlignedBuffer::len`] reports the
        requested size.

        # Errors

        - [`Error::InvalidAlignment`] if `alignment` is not a non-zero
          power of two.
        - [`Error::AllocationFailed`] if the size rounded up to the
          alignment overflows, or the allocator returns null.
    */
    pub fn new(size: usize, alignment: usize) -> Result<Self> {
        if !alignment.is_power_of_two() {
            return Err(Error::InvalidAlignment(alignment));
        }
        let failed = || Error::AllocationFailed { size, alignment };

        let layout = Layout::from_size_align(size.max(1), alignment).map_err(|_| failed())?;

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            log::debug!("allocator returned null for {size} bytes aligned to {alignment}");
            return Err(failed());
        };

        Ok(Self {
            ptr,
            len: size,
            layout,
        })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn alignment(&self) -> usize {
        self.layout.align()
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid and initialised for at least len bytes
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: ptr is valid and initialised for at least len bytes, and
        // &mut self guarantees exclusive access
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("alignment", &self.alignment())
            .finish()
    }
}

// SAFETY: the buffer uniquely owns its allocation, and shared access only
// hands out &[u8]
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

static_assertions::assert_impl_all!(AlignedBuffer: Send, Sync);
static_assertions::assert_not_impl_any!(AlignedBuffer: Clone, Copy);
