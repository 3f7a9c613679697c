// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Batched matrix multiplication over the two innermost dimensions.

use crate::{Shape, Tensor, TensorError};

const OP: &str = "inner_product";

/// Performs a batched matrix multiplication: `output = lhs @ rhs`.
///
/// The two innermost dimensions of each operand are a matrix, `lhs` is
/// `[..., M, K]` and `rhs` is `[..., K, N]`. All leading dimensions are
/// batch dimensions and must match exactly. The output is `[..., M, N]`.
///
/// Each output element is accumulated in `f32` by sequential addition in
/// increasing `k`, so results are reproducible to the bit.
///
/// # Errors
/// Returns [`TensorError::BadShape`] if the ranks differ, the batch
/// dimensions differ, or the inner dimensions `K` differ.
/// Returns [`TensorError::DimensionMismatch`] if the operands have fewer
/// than two dimensions.
/// Returns [`TensorError::Internal`] if the output cannot be allocated.
pub fn inner_product(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    let out_shape = output_shape(lhs.shape(), rhs.shape())?;

    let rank = out_shape.rank();
    let m = out_shape.dims()[rank - 2];
    let n = out_shape.dims()[rank - 1];
    let k = lhs.shape().dims()[rank - 1];

    let mut output = Tensor::allocate(out_shape, OP)?;
    let batches = output.layout().rows() / m;

    tracing::debug!(batches, m, k, n, "inner product");

    let lhs_row = lhs.layout().padded_row_len();
    let rhs_row = rhs.layout().padded_row_len();
    let out_row = output.layout().padded_row_len();

    inner_product_f32_generic(
        lhs.as_padded_slice(),
        rhs.as_padded_slice(),
        output.as_padded_slice_mut(),
        Dims {
            batches,
            m,
            k,
            n,
            lhs_row,
            rhs_row,
            out_row,
        },
    );

    Ok(output)
}

/// Validates the operands and derives the output shape.
fn output_shape(lhs: &Shape, rhs: &Shape) -> Result<Shape, TensorError> {
    if lhs.rank() != rhs.rank() {
        return Err(TensorError::bad_shape(
            OP,
            format!("{lhs} and {rhs} must have the same rank"),
        ));
    }

    let rank = lhs.rank();
    if rank < 2 {
        return Err(TensorError::dimension_mismatch(
            OP,
            format!("{lhs} and {rhs} must have at least 2 dimensions"),
        ));
    }

    let (l, r) = (lhs.dims(), rhs.dims());
    if l[..rank - 2] != r[..rank - 2] {
        return Err(TensorError::bad_shape(
            OP,
            format!("{lhs} and {rhs} must have the same leading shape"),
        ));
    }

    if l[rank - 1] != r[rank - 2] {
        return Err(TensorError::bad_shape(
            OP,
            format!(
                "arrays of shape {lhs} and {rhs} are not compatible for inner product, {} != {}",
                l[rank - 1],
                r[rank - 2]
            ),
        ));
    }

    let mut dims = l[..rank - 2].to_vec();
    dims.push(l[rank - 2]);
    dims.push(r[rank - 1]);
    Ok(Shape::new(dims))
}

/// Extents and padded row strides of one inner product.
#[derive(Debug, Clone, Copy)]
struct Dims {
    batches: usize,
    m: usize,
    k: usize,
    n: usize,
    lhs_row: usize,
    rhs_row: usize,
    out_row: usize,
}

/// Portable f32 kernel over padded storage.
///
/// Each operand is addressed with its own padded row stride; a batch of
/// `lhs` spans `m` padded rows, a batch of `rhs` spans `k`. Output
/// padding lanes are left untouched.
fn inner_product_f32_generic(a: &[f32], b: &[f32], c: &mut [f32], d: Dims) {
    let a_batch = d.m * d.lhs_row;
    let b_batch = d.k * d.rhs_row;
    let c_batch = d.m * d.out_row;

    for batch in 0..d.batches {
        let a = &a[batch * a_batch..(batch + 1) * a_batch];
        let b = &b[batch * b_batch..(batch + 1) * b_batch];
        let c = &mut c[batch * c_batch..(batch + 1) * c_batch];

        for i in 0..d.m {
            let a_row = &a[i * d.lhs_row..i * d.lhs_row + d.k];
            let c_row = &mut c[i * d.out_row..i * d.out_row + d.n];
            for (j, out) in c_row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (p, &a_ip) in a_row.iter().enumerate() {
                    acc += a_ip * b[p * d.rhs_row + j];
                }
                *out = acc;
            }
        }
    }
}
