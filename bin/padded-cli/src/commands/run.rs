// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `padded run` command: execute one tensor job from a TOML file.
//!
//! ```text
//! job.toml → JobConfig → validate → budget check → apply → print
//! ```

use crate::config::{ConfigError, JobConfig, Operation, TensorLiteral};
use anyhow::Context;
use padded_tensor::{elementwise, inner_product, scalar, Tensor};
use std::path::PathBuf;

pub fn execute(job_path: PathBuf, json: bool) -> anyhow::Result<()> {
    let job = JobConfig::from_file(&job_path)?;
    job.validate()?;
    if tracing::enabled!(tracing::Level::TRACE) {
        tracing::trace!("resolved job:\n{}", job.to_toml()?);
    }

    let budget = job.parse_budget()?;
    let needed = job.storage_bytes()?;
    if !budget.allows(needed) {
        anyhow::bail!(
            "job needs {needed} bytes of padded storage but the budget is {budget}"
        );
    }

    tracing::info!(
        op = job.op.as_str(),
        lhs = ?job.lhs.shape,
        storage_bytes = needed,
        %budget,
        "running job"
    );

    let result = apply(&job).with_context(|| format!("'{}' failed", job.op.as_str()))?;

    if json {
        println!("{}", render_json(&result)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              padded · Job Runner                    ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Job:          {}", job_path.display());
    println!("  Operation:    {}", job.op.as_str());
    println!("  Budget:       {budget}  (needs {needed} B)");
    println!("  Result shape: {}", result.shape());
    println!("  Padded shape: {}", result.padded_shape());
    println!();

    for row in result.logical_rows() {
        let cells: Vec<String> = row.iter().map(|x| format!("{x:>10.4}")).collect();
        println!("  {}", cells.join(" "));
    }
    println!();

    Ok(())
}

/// Renders a result as `{ "shape": [..], "data": [..] }`.
fn render_json(result: &Tensor) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TensorLiteral::from_tensor(result))
}

/// Builds the job's operands and runs its operation.
pub fn apply(job: &JobConfig) -> Result<Tensor, ConfigError> {
    let lhs = job.lhs.to_tensor()?;

    let result = match job.op {
        Operation::Add | Operation::Sub | Operation::Mul | Operation::Div => {
            let rhs = rhs_tensor(job)?;
            elementwise(&lhs, &rhs, binary_op(job.op)?)?
        }
        Operation::AddScalar
        | Operation::SubScalar
        | Operation::MulScalar
        | Operation::DivScalar => {
            let value = job
                .scalar
                .ok_or_else(|| missing(job.op, "a scalar"))?;
            scalar(&lhs, value, binary_op(job.op)?)?
        }
        Operation::InnerProduct => {
            let rhs = rhs_tensor(job)?;
            inner_product(&lhs, &rhs)?
        }
        Operation::Reshape => {
            let target = job
                .reshape
                .clone()
                .ok_or_else(|| missing(job.op, "a target shape"))?;
            let mut out = lhs;
            out.reshape(target)?;
            out
        }
        Operation::Copy => lhs.copy()?,
    };

    Ok(result)
}

fn rhs_tensor(job: &JobConfig) -> Result<Tensor, ConfigError> {
    let rhs = job
        .rhs
        .as_ref()
        .ok_or_else(|| missing(job.op, "an [rhs] tensor"))?;
    Ok(rhs.to_tensor()?)
}

fn binary_op(op: Operation) -> Result<padded_tensor::BinaryOp, ConfigError> {
    op.binary_op()
        .ok_or_else(|| ConfigError::InvalidJob(format!("'{}' is not arithmetic", op.as_str())))
}

fn missing(op: Operation, what: &str) -> ConfigError {
    ConfigError::InvalidJob(format!("'{}' needs {what}", op.as_str()))
}
