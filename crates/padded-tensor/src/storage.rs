// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector-aligned `f32` storage.
//!
//! [`AlignedBuffer`] owns a heap block aligned to [`STORAGE_ALIGN`] bytes so
//! that every padded row of a tensor starts on a SIMD-vector boundary. The
//! block is zero-initialised on allocation and freed on drop.

use crate::layout::STORAGE_ALIGN;
use crate::TensorError;
use std::alloc::{self, Layout as AllocLayout};
use std::ptr::NonNull;

/// An owned, zero-initialised, [`STORAGE_ALIGN`]-aligned buffer of `f32`.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
}

impl AlignedBuffer {
    /// Allocates `len` zeroed `f32` slots.
    ///
    /// # Errors
    /// Returns [`TensorError::BadShape`] if the byte size overflows and
    /// [`TensorError::Internal`] if the allocator cannot satisfy the request.
    pub fn zeroed(len: usize) -> Result<Self, TensorError> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
            });
        }

        let layout = Self::alloc_layout(len)?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw as *mut f32).ok_or_else(|| {
            TensorError::internal(
                "allocate",
                format!(
                    "unable to allocate memory: {} bytes aligned to {} were not available",
                    layout.size(),
                    layout.align()
                ),
            )
        })?;

        tracing::trace!(len, bytes = layout.size(), "allocated tensor storage");
        Ok(Self { ptr, len })
    }

    /// Allocates a new buffer holding a copy of `self`, padding included.
    pub fn try_clone(&self) -> Result<Self, TensorError> {
        let mut copy = Self::zeroed(self.len)?;
        copy.as_mut_slice().copy_from_slice(self.as_slice());
        Ok(copy)
    }

    /// Number of `f32` slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the whole buffer as a slice.
    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: `ptr` is valid for `len` initialised f32s (or dangling
        // with len 0) and uniquely owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the whole buffer as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: as above; `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    fn alloc_layout(len: usize) -> Result<AllocLayout, TensorError> {
        let bytes = len
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| {
                TensorError::bad_shape("allocate", format!("{len} f32 elements overflow usize"))
            })?;
        AllocLayout::from_size_align(bytes, STORAGE_ALIGN).map_err(|e| {
            TensorError::bad_shape("allocate", format!("cannot lay out {bytes} bytes: {e}"))
        })
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        if let Ok(layout) = Self::alloc_layout(self.len) {
            // SAFETY: `ptr` came from `alloc_zeroed` with this same layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

// AlignedBuffer uniquely owns its allocation, like a Vec<f32>.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &STORAGE_ALIGN)
            .finish()
    }
}
