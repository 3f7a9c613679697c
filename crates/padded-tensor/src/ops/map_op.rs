// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! User-supplied elementwise mapping.

use crate::layout;
use crate::{Tensor, TensorError};

/// Builds a new tensor by applying `f` to every logical element of `src`.
///
/// `f` receives the element value and its multi-index, and is called in
/// row-major order. Any state the mapping needs is captured by the closure.
/// Padding lanes are never passed to `f`.
///
/// # Examples
/// ```
/// use padded_tensor::{map, Tensor};
/// let t = Tensor::new([2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// // Zero everything off the diagonal.
/// let d = map(&t, |x, idx| if idx[0] == idx[1] { x } else { 0.0 }).unwrap();
/// assert_eq!(d.to_vec(), vec![1.0, 0.0, 0.0, 4.0]);
/// ```
///
/// # Errors
/// Returns [`TensorError::Internal`] if the output cannot be allocated.
pub fn map<F>(src: &Tensor, mut f: F) -> Result<Tensor, TensorError>
where
    F: FnMut(f32, &[usize]) -> f32,
{
    let mut dst = src.copy()?;
    let dims = src.shape().dims();
    let row_len = src.layout().row_len();
    let padded_row_len = src.layout().padded_row_len();
    let mut index = vec![0usize; dims.len()];

    for (i, row) in dst
        .as_padded_slice_mut()
        .chunks_exact_mut(padded_row_len)
        .enumerate()
    {
        for (j, x) in row[..row_len].iter_mut().enumerate() {
            layout::decode_index(i * row_len + j, dims, &mut index);
            *x = f(*x, &index);
        }
    }

    Ok(dst)
}

impl Tensor {
    /// Method form of [`map`].
    pub fn map<F>(&self, f: F) -> Result<Tensor, TensorError>
    where
        F: FnMut(f32, &[usize]) -> f32,
    {
        map(self, f)
    }
}
