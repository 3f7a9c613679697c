// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor operations.
//!
//! Every operation validates its operands first, then allocates a fresh
//! output tensor; inputs are only read. Kernels walk logical rows of the
//! padded storage and never write padding lanes, so outputs keep the
//! all-zero padding their storage was allocated with.

mod elementwise_op;
mod inner_product_op;
mod map_op;

pub use elementwise_op::{
    add, add_scalar, div, div_scalar, elementwise, mul, mul_scalar, scalar, sub, sub_scalar,
    BinaryOp,
};
pub use inner_product_op::inner_product;
pub use map_op::map;
