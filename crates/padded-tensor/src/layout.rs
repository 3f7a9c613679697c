// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Padded storage layout.
//!
//! Tensors store their innermost dimension padded up to a multiple of
//! [`LANE_WIDTH`] so that every logical row starts on a SIMD-vector
//! boundary. All other dimensions are stored unpadded, in row-major order:
//!
//! ```text
//! shape        [2, 3]           padded shape [2, 8]
//!
//! storage      a a a 0 0 0 0 0 | b b b 0 0 0 0 0
//!              └ row 0 ────────┘ └ row 1 ────────┘
//! ```
//!
//! The element at multi-index `(i0, ..., i_{n-1})` lives at
//! `sum(i_d * padded_stride_d)`, where the strides are computed from the
//! *padded* shape.

use crate::{Shape, TensorError};

/// Number of `f32` lanes in one SIMD vector; the innermost dimension is
/// padded to a multiple of this.
pub const LANE_WIDTH: usize = 8;

/// Byte alignment of tensor storage: one full vector of `f32`.
pub const STORAGE_ALIGN: usize = LANE_WIDTH * std::mem::size_of::<f32>();

/// Rounds `n` up to the next multiple of `v`.
///
/// Returns `n` unchanged when it is already a multiple of `v`.
///
/// # Panics
/// Panics if `v` is zero.
#[inline]
pub fn pad(n: usize, v: usize) -> usize {
    n + ((v - n % v) % v)
}

/// Multiplies the dimensions together. The empty product is 1.
///
/// Returns `None` if the product overflows `usize`.
pub fn product(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Derives the padded shape: `shape` with its last extent rounded up to
/// a multiple of [`LANE_WIDTH`].
///
/// # Errors
/// Returns [`TensorError::BadShape`] for an invalid shape or if the padded
/// extent overflows.
pub fn padded_shape(shape: &Shape) -> Result<Shape, TensorError> {
    pad_last(shape, "padded_shape")
}

fn pad_last(shape: &Shape, op: &'static str) -> Result<Shape, TensorError> {
    shape.validate(op)?;
    let mut dims = shape.dims().to_vec();
    let last = dims.len() - 1;
    dims[last] = checked_pad(dims[last])
        .ok_or_else(|| TensorError::bad_shape(op, format!("padding of shape {shape} overflows")))?;
    Ok(Shape::new(dims))
}

/// Recovers the multi-index of the logical (unpadded) flat offset `flat`
/// in a tensor of extents `dims`, writing it into `index`.
///
/// The last dimension varies fastest.
///
/// # Panics
/// Panics if `index` is shorter than `dims`.
pub fn decode_index(flat: usize, dims: &[usize], index: &mut [usize]) {
    let mut stride = 1usize;
    for d in (0..dims.len()).rev() {
        index[d] = (flat / stride) % dims[d];
        stride = stride.saturating_mul(dims[d]);
    }
}

#[inline]
fn checked_pad(n: usize) -> Option<usize> {
    n.checked_add((LANE_WIDTH - n % LANE_WIDTH) % LANE_WIDTH)
}

/// The validated logical and padded shapes of a tensor, plus the derived
/// quantities every traversal needs.
///
/// A `Layout` can only be built from a valid shape whose storage size fits
/// in `usize`, so all of its accessors are infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    padded_shape: Shape,
    rows: usize,
    storage_len: usize,
}

impl Layout {
    /// Validates `shape` and derives its padded layout.
    ///
    /// `op` names the operation reported in any error.
    ///
    /// # Errors
    /// Returns [`TensorError::BadShape`] if the shape is empty, has a zero
    /// extent, or if its padded storage length overflows.
    pub fn new(shape: Shape, op: &'static str) -> Result<Self, TensorError> {
        let padded_shape = pad_last(&shape, op)?;
        let overflow =
            || TensorError::bad_shape(op, format!("storage for shape {shape} overflows usize"));

        let padded_last = padded_shape.last().unwrap_or(LANE_WIDTH);
        let rows = product(shape.leading()).ok_or_else(overflow)?;
        let storage_len = rows.checked_mul(padded_last).ok_or_else(overflow)?;

        Ok(Self {
            shape,
            padded_shape,
            rows,
            storage_len,
        })
    }

    /// Returns the logical shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the padded shape.
    pub fn padded_shape(&self) -> &Shape {
        &self.padded_shape
    }

    /// Returns the rank.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of logical rows: the product of all leading dimensions
    /// (1 for a rank-1 tensor).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Logical length of the innermost dimension.
    pub fn row_len(&self) -> usize {
        self.shape.last().unwrap_or(1)
    }

    /// Padded length of the innermost dimension; the storage distance
    /// between consecutive rows.
    pub fn padded_row_len(&self) -> usize {
        self.padded_shape.last().unwrap_or(LANE_WIDTH)
    }

    /// Number of logical elements.
    pub fn num_elements(&self) -> usize {
        // Bounded by storage_len, which did not overflow.
        self.rows * self.row_len()
    }

    /// Number of `f32` slots in the padded storage.
    pub fn storage_len(&self) -> usize {
        self.storage_len
    }

    /// Number of padding slots in the storage.
    pub fn padding_len(&self) -> usize {
        self.storage_len - self.num_elements()
    }

    /// Row-major strides over the padded shape, in elements.
    pub fn padded_strides(&self) -> Vec<usize> {
        let dims = self.padded_shape.dims();
        let mut strides = vec![1usize; dims.len()];
        for i in (0..dims.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * dims[i + 1];
        }
        strides
    }

    /// Storage offset of a logical row.
    #[inline]
    pub fn row_offset(&self, row: usize) -> usize {
        row * self.padded_row_len()
    }

    /// Storage offset of the element at `index`, or `None` if `index` has
    /// the wrong rank or is out of bounds.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.rank() {
            return None;
        }
        let mut offset = 0usize;
        let mut stride = 1usize;
        for d in (0..index.len()).rev() {
            if index[d] >= self.shape.dims()[d] {
                return None;
            }
            offset += index[d] * stride;
            stride *= self.padded_shape.dims()[d];
        }
        Some(offset)
    }
}
