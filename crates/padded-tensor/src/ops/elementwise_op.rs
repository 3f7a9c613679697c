// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise tensor-tensor and tensor-scalar arithmetic.

use crate::{Tensor, TensorError};

/// A binary arithmetic operator applied lane by lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, following IEEE 754 for division by zero.
    Div,
}

impl BinaryOp {
    /// Applies the operator to a pair of values.
    #[inline(always)]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }

    /// Returns the operator's name.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }
}

/// Applies `op` to every pair of corresponding elements of `lhs` and `rhs`.
///
/// The shapes must be exactly equal; there is no broadcasting. Only
/// logical lanes are computed, padding lanes keep the (zero) value copied
/// from `lhs`.
///
/// # Errors
/// Returns [`TensorError::BadShape`] if the shapes differ.
/// Returns [`TensorError::Internal`] if the output cannot be allocated.
pub fn elementwise(lhs: &Tensor, rhs: &Tensor, op: BinaryOp) -> Result<Tensor, TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::bad_shape(
            op.as_str(),
            format!(
                "expected shapes {} and {} to be equal",
                lhs.shape(),
                rhs.shape()
            ),
        ));
    }

    let mut dst = lhs.copy()?;
    let row_len = lhs.layout().row_len();
    let padded_row_len = lhs.layout().padded_row_len();

    // Equal shapes imply identical padded layouts.
    let rows = dst
        .as_padded_slice_mut()
        .chunks_exact_mut(padded_row_len)
        .zip(lhs.as_padded_slice().chunks_exact(padded_row_len))
        .zip(rhs.as_padded_slice().chunks_exact(padded_row_len));

    for ((d, a), b) in rows {
        for j in 0..row_len {
            d[j] = op.apply(a[j], b[j]);
        }
    }

    Ok(dst)
}

/// Applies `op` to every element of `lhs` with `value` as the right operand.
///
/// # Errors
/// Returns [`TensorError::Internal`] if the output cannot be allocated.
pub fn scalar(lhs: &Tensor, value: f32, op: BinaryOp) -> Result<Tensor, TensorError> {
    let mut dst = lhs.copy()?;
    let row_len = lhs.layout().row_len();
    let padded_row_len = lhs.layout().padded_row_len();

    let rows = dst
        .as_padded_slice_mut()
        .chunks_exact_mut(padded_row_len)
        .zip(lhs.as_padded_slice().chunks_exact(padded_row_len));

    for (d, a) in rows {
        for j in 0..row_len {
            d[j] = op.apply(a[j], value);
        }
    }

    Ok(dst)
}

/// Elementwise `lhs + rhs`.
pub fn add(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    elementwise(lhs, rhs, BinaryOp::Add)
}

/// Elementwise `lhs - rhs`.
pub fn sub(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    elementwise(lhs, rhs, BinaryOp::Sub)
}

/// Elementwise `lhs * rhs`.
pub fn mul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    elementwise(lhs, rhs, BinaryOp::Mul)
}

/// Elementwise `lhs / rhs`.
pub fn div(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    elementwise(lhs, rhs, BinaryOp::Div)
}

/// `lhs + s` for every element.
pub fn add_scalar(lhs: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    scalar(lhs, s, BinaryOp::Add)
}

/// `lhs - s` for every element.
pub fn sub_scalar(lhs: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    scalar(lhs, s, BinaryOp::Sub)
}

/// `lhs * s` for every element.
pub fn mul_scalar(lhs: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    scalar(lhs, s, BinaryOp::Mul)
}

/// `lhs / s` for every element.
pub fn div_scalar(lhs: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    scalar(lhs, s, BinaryOp::Div)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn pair() -> (Tensor, Tensor) {
        let a = Tensor::new([2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Tensor::new([2, 2], &[5.0, 6.0, 7.0, 8.0]).unwrap();
        (a, b)
    }

    fn padding_is_zero(t: &Tensor) -> bool {
        let row_len = t.layout().row_len();
        t.as_padded_slice()
            .chunks_exact(t.layout().padded_row_len())
            .all(|row| row[row_len..].iter().all(|&x| x == 0.0))
    }

    #[test]
    fn test_add() {
        let (a, b) = pair();
        let c = add(&a, &b).unwrap();
        assert_eq!(c.shape().dims(), &[2, 2]);
        assert_eq!(c.to_vec(), vec![6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_sub_is_subtraction() {
        let (a, b) = pair();
        let c = sub(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![-4.0, -4.0, -4.0, -4.0]);
    }

    #[test]
    fn test_mul() {
        let (a, b) = pair();
        let c = mul(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![5.0, 12.0, 21.0, 32.0]);
    }

    #[test]
    fn test_div() {
        let (a, b) = pair();
        let c = div(&b, &a).unwrap();
        assert_eq!(c.to_vec(), vec![5.0, 3.0, 7.0 / 3.0, 2.0]);
    }

    #[test]
    fn test_div_by_zero_follows_ieee() {
        let a = Tensor::new([3], &[1.0, -1.0, 0.0]).unwrap();
        let z = Tensor::zeros([3]).unwrap();
        let c = div(&a, &z).unwrap();
        let v = c.to_vec();
        assert_eq!(v[0], f32::INFINITY);
        assert_eq!(v[1], f32::NEG_INFINITY);
        assert!(v[2].is_nan());
        // 0/0 in the padding lanes would be NaN; they are never computed.
        assert!(padding_is_zero(&c));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Tensor::zeros([2, 3]).unwrap();
        let b = Tensor::zeros([3, 2]).unwrap();
        let err = add(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadShape);
        let msg = err.to_string();
        assert!(msg.contains("[2, 3]") && msg.contains("[3, 2]"), "{msg}");
    }

    #[test]
    fn test_shape_mismatch_same_count_different_rank() {
        let a = Tensor::zeros([6]).unwrap();
        let b = Tensor::zeros([2, 3]).unwrap();
        assert_eq!(mul(&a, &b).unwrap_err().kind(), ErrorKind::BadShape);
    }

    #[test]
    fn test_operands_unchanged() {
        let (a, b) = pair();
        let _ = add(&a, &b).unwrap();
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_add_scalar() {
        let a = Tensor::new([3], &[1.0, 2.0, 3.0]).unwrap();
        let c = add_scalar(&a, 10.0).unwrap();
        assert_eq!(c.to_vec(), vec![11.0, 12.0, 13.0]);
        assert!(padding_is_zero(&c));
    }

    #[test]
    fn test_scalar_ops() {
        let a = Tensor::new([2, 2], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(sub_scalar(&a, 1.0).unwrap().to_vec(), vec![1.0, 3.0, 5.0, 7.0]);
        assert_eq!(mul_scalar(&a, 0.5).unwrap().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(div_scalar(&a, 2.0).unwrap().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_wide_rows_span_multiple_lanes() {
        let values: Vec<f32> = (0..20).map(|x| x as f32).collect();
        let a = Tensor::new([2, 10], &values).unwrap();
        let c = add(&a, &a).unwrap();
        let expected: Vec<f32> = values.iter().map(|x| x * 2.0).collect();
        assert_eq!(c.to_vec(), expected);
        assert_eq!(c.padded_shape().dims(), &[2, 16]);
        assert!(padding_is_zero(&c));
    }

    #[test]
    fn test_op_names() {
        assert_eq!(BinaryOp::Add.as_str(), "add");
        assert_eq!(BinaryOp::Sub.as_str(), "sub");
        assert_eq!(BinaryOp::Mul.as_str(), "mul");
        assert_eq!(BinaryOp::Div.as_str(), "div");
    }
}
