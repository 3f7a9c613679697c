// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

/// Errors that can occur during tensor operations.
///
/// Every variant names the operation that failed and carries a human-readable
/// detail string; shape problems include the formatted shapes involved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// Allocation or another system resource failed.
    #[error("internal error in {op}: {detail}")]
    Internal { op: &'static str, detail: String },

    /// The data or the operands do not conform to the required shape.
    #[error("bad shape in {op}: {detail}")]
    BadShape { op: &'static str, detail: String },

    /// An operand has too few dimensions for the operation.
    #[error("dimension mismatch in {op}: {detail}")]
    DimensionMismatch { op: &'static str, detail: String },
}

/// Coarse classification of a [`TensorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Internal,
    BadShape,
    DimensionMismatch,
}

impl TensorError {
    pub(crate) fn internal(op: &'static str, detail: impl Into<String>) -> Self {
        Self::Internal {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn bad_shape(op: &'static str, detail: impl Into<String>) -> Self {
        Self::BadShape {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn dimension_mismatch(op: &'static str, detail: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            op,
            detail: detail.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::Internal { .. } => ErrorKind::Internal,
            TensorError::BadShape { .. } => ErrorKind::BadShape,
            TensorError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }

    /// Returns the name of the operation that failed.
    pub fn op(&self) -> &'static str {
        match self {
            TensorError::Internal { op, .. }
            | TensorError::BadShape { op, .. }
            | TensorError::DimensionMismatch { op, .. } => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_op_and_detail() {
        let e = TensorError::bad_shape("add", "expected shapes [2, 2] and [3] to be equal");
        assert_eq!(
            e.to_string(),
            "bad shape in add: expected shapes [2, 2] and [3] to be equal"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(TensorError::internal("alloc", "oom").kind(), ErrorKind::Internal);
        assert_eq!(TensorError::bad_shape("x", "y").kind(), ErrorKind::BadShape);
        assert_eq!(
            TensorError::dimension_mismatch("inner_product", "rank 1").kind(),
            ErrorKind::DimensionMismatch
        );
        assert_eq!(TensorError::bad_shape("reshape", "").op(), "reshape");
    }
}
