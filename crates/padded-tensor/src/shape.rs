// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors.

use crate::{layout, TensorError};
use std::fmt;

/// The logical extents of a [`crate::Tensor`], outermost dimension first.
///
/// A `Shape` can be built from any list of dimensions; it is checked when a
/// tensor is created from it. A usable shape has at least one dimension and
/// every extent is positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Wraps a dimension list. Nothing is checked until [`Shape::validate`].
    ///
    /// # Examples
    /// ```
    /// use padded_tensor::Shape;
    /// let batch = Shape::new(vec![4, 2, 10]);
    /// assert_eq!(batch.leading(), &[4, 2]);
    /// assert_eq!(batch.num_elements(), Some(80));
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// `[len]`
    pub fn vector(len: usize) -> Self {
        Self::new(vec![len])
    }

    /// `[rows, cols]`
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self::new(vec![rows, cols])
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Extent of dimension `axis`, if the shape has one.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Returns the innermost extent, or `None` for an empty shape.
    pub fn last(&self) -> Option<usize> {
        self.dims.last().copied()
    }

    /// Returns every dimension except the innermost one.
    pub fn leading(&self) -> &[usize] {
        match self.dims.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Returns the total number of logical elements, or `None` on overflow.
    pub fn num_elements(&self) -> Option<usize> {
        layout::product(&self.dims)
    }

    /// Checks that the shape has at least one dimension and no zero extent.
    ///
    /// `op` names the operation reported in the error.
    pub fn validate(&self, op: &'static str) -> Result<(), TensorError> {
        if self.dims.is_empty() {
            return Err(TensorError::bad_shape(
                op,
                "shape must have at least one dimension",
            ));
        }
        if let Some(axis) = self.dims.iter().position(|&d| d == 0) {
            return Err(TensorError::bad_shape(
                op,
                format!("shape {self} has a zero extent in dimension {axis}"),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut sep = "";
        for d in &self.dims {
            write!(f, "{sep}{d}")?;
            sep = ", ";
        }
        f.write_str("]")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self { dims }
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self { dims: dims.to_vec() }
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_vector_has_no_leading_dims() {
        let v = Shape::vector(11);
        assert_eq!(v.dims(), &[11]);
        assert!(v.leading().is_empty());
        assert_eq!(v.last(), Some(11));
    }

    #[test]
    fn test_matrix_accessors() {
        let m = Shape::matrix(6, 9);
        assert_eq!((m.rank(), m.num_elements()), (2, Some(54)));
        assert_eq!(m.leading(), &[6]);
        assert_eq!(m.dim(1), Some(9));
        assert_eq!(m.dim(2), None);
    }

    #[test]
    fn test_num_elements_overflow() {
        let s = Shape::new(vec![usize::MAX, 2]);
        assert_eq!(s.num_elements(), None);
    }

    #[test]
    fn test_validate() {
        assert!(Shape::new(vec![2, 3]).validate("test").is_ok());

        let err = Shape::new(vec![]).validate("test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadShape);

        let err = Shape::new(vec![2, 0]).validate("test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadShape);
        assert!(err.to_string().contains("[2, 0]"));
    }

    #[test]
    fn test_display_lists_extents() {
        assert_eq!(Shape::new(vec![5, 1, 8]).to_string(), "[5, 1, 8]");
        assert_eq!(Shape::vector(7).to_string(), "[7]");
    }

    #[test]
    fn test_conversions_agree() {
        let from_vec = Shape::from(vec![3, 5]);
        let from_slice = Shape::from(&[3usize, 5][..]);
        let from_array = Shape::from([3, 5]);
        assert_eq!(from_vec, from_slice);
        assert_eq!(from_slice, from_array);
        assert_eq!(Shape::from(&from_array), from_vec);
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = Shape::new(vec![4, 1, 9]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[4,1,9]");
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
