// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Job configuration loaded from TOML files.
//!
//! # TOML Format
//! ```toml
//! memory_budget = "64M"
//! op = "inner-product"
//!
//! [lhs]
//! shape = [2, 2]
//! data = [1.0, 2.0, 3.0, 4.0]
//!
//! [rhs]
//! shape = [2, 2]
//! data = [5.0, 6.0, 7.0, 8.0]
//! ```
//!
//! Scalar operations take `scalar = <f32>` instead of `[rhs]`, and
//! `op = "reshape"` takes `reshape = [..]`.

use crate::budget::MemoryBudget;
use padded_tensor::{BinaryOp, Layout, Shape, Tensor, TensorError};
use std::path::{Path, PathBuf};

/// Errors raised while loading or checking a job.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read job '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialise error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid budget: {0}")]
    Budget(String),

    #[error("invalid job: {0}")]
    InvalidJob(String),

    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// The operation a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    AddScalar,
    SubScalar,
    MulScalar,
    DivScalar,
    InnerProduct,
    Reshape,
    Copy,
}

impl Operation {
    /// Returns the operation's config name.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::AddScalar => "add-scalar",
            Operation::SubScalar => "sub-scalar",
            Operation::MulScalar => "mul-scalar",
            Operation::DivScalar => "div-scalar",
            Operation::InnerProduct => "inner-product",
            Operation::Reshape => "reshape",
            Operation::Copy => "copy",
        }
    }

    /// The arithmetic operator behind a tensor-tensor or tensor-scalar op.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Operation::Add | Operation::AddScalar => Some(BinaryOp::Add),
            Operation::Sub | Operation::SubScalar => Some(BinaryOp::Sub),
            Operation::Mul | Operation::MulScalar => Some(BinaryOp::Mul),
            Operation::Div | Operation::DivScalar => Some(BinaryOp::Div),
            Operation::InnerProduct | Operation::Reshape | Operation::Copy => None,
        }
    }

    /// Whether the operation takes a right-hand tensor.
    pub fn needs_rhs(self) -> bool {
        matches!(
            self,
            Operation::Add
                | Operation::Sub
                | Operation::Mul
                | Operation::Div
                | Operation::InnerProduct
        )
    }

    /// Whether the operation takes a scalar operand.
    pub fn needs_scalar(self) -> bool {
        matches!(
            self,
            Operation::AddScalar | Operation::SubScalar | Operation::MulScalar | Operation::DivScalar
        )
    }
}

/// A tensor written out as its logical shape and row-major data.
///
/// Non-finite values are written as the strings `"inf"`, `"-inf"` and
/// `"NaN"` so they survive formats without IEEE specials, such as JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensorLiteral {
    pub shape: Vec<usize>,
    #[serde(with = "float_values")]
    pub data: Vec<f32>,
}

/// Serde adapter for `f32` lists that keeps infinities and NaN.
mod float_values {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f32),
        Named(String),
    }

    pub fn serialize<S: Serializer>(data: &[f32], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(data.len()))?;
        for &x in data {
            if x.is_nan() {
                seq.serialize_element("NaN")?;
            } else if x == f32::INFINITY {
                seq.serialize_element("inf")?;
            } else if x == f32::NEG_INFINITY {
                seq.serialize_element("-inf")?;
            } else {
                seq.serialize_element(&x)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f32>, D::Error> {
        Vec::<Value>::deserialize(deserializer)?
            .into_iter()
            .map(|v| match v {
                Value::Number(x) => Ok(x),
                Value::Named(name) => match name.as_str() {
                    "inf" | "+inf" => Ok(f32::INFINITY),
                    "-inf" => Ok(f32::NEG_INFINITY),
                    "NaN" | "nan" => Ok(f32::NAN),
                    _ => Err(D::Error::custom(format!(
                        "expected a number, \"inf\", \"-inf\" or \"NaN\", found \"{name}\""
                    ))),
                },
            })
            .collect()
    }
}

impl TensorLiteral {
    /// Builds the tensor.
    pub fn to_tensor(&self) -> Result<Tensor, TensorError> {
        Tensor::new(self.shape.clone(), &self.data)
    }

    /// Captures a tensor's logical shape and data.
    pub fn from_tensor(tensor: &Tensor) -> Self {
        Self {
            shape: tensor.shape().dims().to_vec(),
            data: tensor.to_vec(),
        }
    }

    fn storage_bytes(&self) -> Result<usize, TensorError> {
        storage_bytes(Shape::new(self.shape.clone()))
    }
}

/// One tensor operation and its operands.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct JobConfig {
    /// Storage budget for operands plus result (human-readable, e.g. `"64M"`).
    #[serde(default = "default_budget")]
    pub memory_budget: String,
    /// Operation to run.
    pub op: Operation,
    /// Scalar operand for the `*-scalar` operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar: Option<f32>,
    /// Target shape for `reshape`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reshape: Option<Vec<usize>>,
    /// Left-hand (or only) operand.
    pub lhs: TensorLiteral,
    /// Right-hand operand for tensor-tensor operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhs: Option<TensorLiteral>,
}

fn default_budget() -> String {
    "64M".to_string()
}

impl JobConfig {
    /// Loads a job from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses a job from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialises the job to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses the budget string.
    pub fn parse_budget(&self) -> Result<MemoryBudget, ConfigError> {
        MemoryBudget::parse(&self.memory_budget)
    }

    /// Checks that the operands the operation needs are present, and only those.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let op = self.op.as_str();
        if self.op.needs_rhs() != self.rhs.is_some() {
            return Err(ConfigError::InvalidJob(if self.op.needs_rhs() {
                format!("'{op}' needs an [rhs] tensor")
            } else {
                format!("'{op}' does not take an [rhs] tensor")
            }));
        }
        if self.op.needs_scalar() && self.scalar.is_none() {
            return Err(ConfigError::InvalidJob(format!("'{op}' needs a scalar")));
        }
        if !self.op.needs_scalar() && self.scalar.is_some() {
            return Err(ConfigError::InvalidJob(format!(
                "'{op}' does not take a scalar"
            )));
        }
        let is_reshape = self.op == Operation::Reshape;
        if is_reshape != self.reshape.is_some() {
            return Err(ConfigError::InvalidJob(if is_reshape {
                "'reshape' needs a target shape".to_string()
            } else {
                format!("'{op}' does not take a reshape target")
            }));
        }
        Ok(())
    }

    /// Padded storage bytes the job allocates: operands plus result.
    pub fn storage_bytes(&self) -> Result<usize, ConfigError> {
        let lhs = self.lhs.storage_bytes()?;
        let rhs = match &self.rhs {
            Some(rhs) => rhs.storage_bytes()?,
            None => 0,
        };
        let result = match self.op {
            Operation::InnerProduct => match (self.lhs.shape.as_slice(), &self.rhs) {
                ([lead @ .., m, _], Some(rhs)) if !rhs.shape.is_empty() => {
                    let mut dims = lead.to_vec();
                    dims.push(*m);
                    dims.push(rhs.shape[rhs.shape.len() - 1]);
                    storage_bytes(Shape::new(dims))?
                }
                _ => 0,
            },
            // Reshape also holds a logical copy of the data while rebuilding.
            Operation::Reshape => match &self.reshape {
                Some(target) => storage_bytes(Shape::new(target.clone()))?
                    .saturating_add(
                        self.lhs.data.len().saturating_mul(std::mem::size_of::<f32>()),
                    ),
                None => 0,
            },
            _ => lhs,
        };

        [lhs, rhs, result]
            .into_iter()
            .try_fold(0usize, |acc, b| acc.checked_add(b))
            .ok_or_else(|| ConfigError::InvalidJob("job storage overflows usize".into()))
    }
}

fn storage_bytes(shape: Shape) -> Result<usize, TensorError> {
    let layout = Layout::new(shape, "job")?;
    // Layout construction guarantees the element count fits; bytes may not.
    Ok(layout
        .storage_len()
        .saturating_mul(std::mem::size_of::<f32>()))
}
