// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The owned tensor type.

use crate::layout::{self, Layout};
use crate::storage::AlignedBuffer;
use crate::{Shape, TensorError};

/// An owned, n-dimensional `f32` tensor with lane-padded storage.
///
/// # Memory Layout
/// Data is stored in row-major order. The innermost dimension is padded
/// up to a multiple of [`LANE_WIDTH`](crate::LANE_WIDTH) and the buffer is
/// aligned to one SIMD vector, so every logical row starts on a vector
/// boundary. Padding lanes are always zero.
///
/// Callers only ever see the logical, unpadded data: [`Tensor::new`] and
/// [`Tensor::set_data`] take it, [`Tensor::to_vec`] returns it.
///
/// # Ownership
/// Each tensor exclusively owns its storage. Operations that produce a
/// tensor ([`copy`](Tensor::copy), [`map`](Tensor::map), the arithmetic ops
/// and [`inner_product`](crate::inner_product)) allocate a fresh one.
pub struct Tensor {
    layout: Layout,
    storage: AlignedBuffer,
}

impl Tensor {
    /// Creates a tensor of the given shape from row-major logical contents.
    ///
    /// # Examples
    /// ```
    /// use padded_tensor::Tensor;
    /// let t = Tensor::new([2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(t.shape().dims(), &[2, 3]);
    /// assert_eq!(t.padded_shape().dims(), &[2, 8]);
    /// assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// ```
    ///
    /// # Errors
    /// Returns [`TensorError::BadShape`] if the shape is invalid or its
    /// element count differs from `contents.len()`, and
    /// [`TensorError::Internal`] if storage cannot be allocated.
    pub fn new(shape: impl Into<Shape>, contents: &[f32]) -> Result<Self, TensorError> {
        Self::from_contents(shape.into(), contents, "new")
    }

    /// Creates a zero-filled tensor.
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self, TensorError> {
        Self::allocate(shape.into(), "zeros")
    }

    /// Allocates zeroed storage for `shape`.
    pub(crate) fn allocate(shape: Shape, op: &'static str) -> Result<Self, TensorError> {
        let layout = Layout::new(shape, op)?;
        let storage = AlignedBuffer::zeroed(layout.storage_len())?;
        Ok(Self { layout, storage })
    }

    fn from_contents(shape: Shape, contents: &[f32], op: &'static str) -> Result<Self, TensorError> {
        shape.validate(op)?;
        let expected = layout::product(shape.dims()).ok_or_else(|| {
            TensorError::bad_shape(op, format!("element count of shape {shape} overflows usize"))
        })?;
        if expected != contents.len() {
            return Err(TensorError::bad_shape(
                op,
                format!(
                    "shape {shape} has product {expected} which does not match array length {}",
                    contents.len()
                ),
            ));
        }

        let mut tensor = Self::allocate(shape, op)?;
        let row_len = tensor.layout.row_len();
        let padded_row_len = tensor.layout.padded_row_len();

        for (dst, src) in tensor
            .storage
            .as_mut_slice()
            .chunks_exact_mut(padded_row_len)
            .zip(contents.chunks_exact(row_len))
        {
            dst[..row_len].copy_from_slice(src);
            dst[row_len..].fill(0.0);
        }

        Ok(tensor)
    }

    /// Replaces the tensor's shape and contents.
    ///
    /// The new storage is fully built before it replaces the old one; on
    /// error the tensor is left exactly as it was.
    ///
    /// # Errors
    /// Same as [`Tensor::new`].
    pub fn set_data(&mut self, contents: &[f32], shape: impl Into<Shape>) -> Result<(), TensorError> {
        *self = Self::from_contents(shape.into(), contents, "set_data")?;
        Ok(())
    }

    /// Returns the logical contents in row-major order, padding dropped.
    pub fn to_vec(&self) -> Vec<f32> {
        let row_len = self.layout.row_len();
        let mut out = Vec::with_capacity(self.layout.num_elements());
        for row in self.logical_rows() {
            debug_assert_eq!(row.len(), row_len);
            out.extend_from_slice(row);
        }
        out
    }

    /// Returns an independent deep copy, padding lanes included.
    ///
    /// # Errors
    /// Returns [`TensorError::Internal`] if storage cannot be allocated.
    pub fn copy(&self) -> Result<Self, TensorError> {
        Ok(Self {
            layout: self.layout.clone(),
            storage: self.storage.try_clone()?,
        })
    }

    /// Gives the tensor a new shape with the same number of elements,
    /// keeping the row-major logical contents.
    ///
    /// # Errors
    /// Returns [`TensorError::BadShape`] if `shape` is invalid or holds a
    /// different number of elements. The tensor is unchanged on error.
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), TensorError> {
        let shape = shape.into();
        shape.validate("reshape")?;
        let current = self.layout.num_elements();
        if layout::product(shape.dims()) != Some(current) {
            return Err(TensorError::bad_shape(
                "reshape",
                format!(
                    "cannot reshape {} ({current} elements) into {shape}",
                    self.shape()
                ),
            ));
        }
        let data = self.to_vec();
        *self = Self::from_contents(shape, &data, "reshape")?;
        Ok(())
    }

    /// Returns the logical shape.
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// Returns the padded storage shape.
    pub fn padded_shape(&self) -> &Shape {
        self.layout.padded_shape()
    }

    /// Returns the storage layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the rank.
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Returns the number of logical elements.
    pub fn num_elements(&self) -> usize {
        self.layout.num_elements()
    }

    /// Returns the size of the padded storage in bytes.
    pub fn size_bytes(&self) -> usize {
        self.storage.len() * std::mem::size_of::<f32>()
    }

    /// Returns the element at the logical multi-index `index`.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        self.layout
            .offset(index)
            .map(|o| self.storage.as_slice()[o])
    }

    /// Returns the raw padded storage, padding lanes included.
    pub fn as_padded_slice(&self) -> &[f32] {
        self.storage.as_slice()
    }

    pub(crate) fn as_padded_slice_mut(&mut self) -> &mut [f32] {
        self.storage.as_mut_slice()
    }

    /// Iterates over the logical rows (innermost dimension), padding dropped.
    pub fn logical_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let row_len = self.layout.row_len();
        self.storage
            .as_slice()
            .chunks_exact(self.layout.padded_row_len())
            .map(move |row| &row[..row_len])
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", self.shape())
            .field("padded_shape", self.padded_shape())
            .field("data", &self.to_vec())
            .finish()
    }
}
