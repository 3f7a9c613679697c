// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # padded-tensor
//!
//! Dense `f32` tensors with SIMD-lane padded storage.
//!
//! This crate provides:
//! - [`Tensor`]: an owned n-dimensional tensor whose innermost dimension is
//!   padded to a multiple of [`LANE_WIDTH`] in vector-aligned storage.
//! - [`Shape`] and [`Layout`]: logical shapes and the padded layout derived
//!   from them.
//! - Operations: [`map`], elementwise arithmetic ([`add`], [`sub`], [`mul`],
//!   [`div`] and their scalar forms), and batched [`inner_product`].
//!
//! # Example
//! ```
//! use padded_tensor::{add_scalar, inner_product, Tensor};
//!
//! let a = Tensor::new([2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Tensor::new([2, 2], &[5.0, 6.0, 7.0, 8.0]).unwrap();
//!
//! let c = inner_product(&a, &b).unwrap();
//! assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
//!
//! let d = add_scalar(&c, 1.0).unwrap();
//! assert_eq!(d.to_vec(), vec![20.0, 23.0, 44.0, 51.0]);
//! ```
//!
//! # Design Goals
//! - Every row starts on a 32-byte boundary; padding lanes are always zero.
//! - Callers only see logical, unpadded data.
//! - Shape and size errors are reported, never panicked on, via `thiserror`.

mod error;
pub mod layout;
mod ops;
mod shape;
mod storage;
mod tensor;

pub use error::{ErrorKind, TensorError};
pub use layout::{Layout, LANE_WIDTH, STORAGE_ALIGN};
pub use ops::{
    add, add_scalar, div, div_scalar, elementwise, inner_product, map, mul, mul_scalar, scalar,
    sub, sub_scalar, BinaryOp,
};
pub use shape::Shape;
pub use storage::AlignedBuffer;
pub use tensor::Tensor;
