// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Storage budget for a job.
//!
//! A [`MemoryBudget`] caps the padded tensor storage a job may allocate
//! (operands plus result). It parses human-readable sizes for config files.

use crate::config::ConfigError;
use std::fmt;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// Upper bound on the tensor storage a job may allocate.
///
/// # Parsing
/// Accepts a number with an optional binary suffix, case-insensitive:
/// `"2048K"`/`"2048KB"`, `"64M"`/`"64MB"`, `"1G"`/`"1GB"`, `"512B"` or a
/// plain byte count such as `"1048576"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Cap in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns `true` if `bytes` fits within the budget.
    pub fn allows(&self, bytes: usize) -> bool {
        bytes <= self.bytes
    }

    /// Parses `"64M"`, `"1GB"`, `"512B"` or a bare byte count.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        let (digits, multiplier) = [
            ("GB", GIB),
            ("G", GIB),
            ("MB", MIB),
            ("M", MIB),
            ("KB", KIB),
            ("K", KIB),
            ("B", 1),
        ]
        .iter()
        .find(|(suffix, _)| upper.ends_with(suffix))
        .map(|&(suffix, mult)| (&trimmed[..trimmed.len() - suffix.len()], mult))
        .unwrap_or((trimmed, 1));

        let value: usize = digits.trim().parse().map_err(|_| {
            ConfigError::Budget(format!(
                "'{s}' is not a size; expected a number with an optional K, M or G suffix"
            ))
        })?;
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| ConfigError::Budget(format!("'{s}' overflows")))?;
        if bytes == 0 {
            return Err(ConfigError::Budget("budget must be greater than zero".into()));
        }

        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes;
        if b >= GIB && b % GIB == 0 {
            write!(f, "{} GB", b / GIB)
        } else if b >= MIB && b % MIB == 0 {
            write!(f, "{} MB", b / MIB)
        } else if b >= KIB && b % KIB == 0 {
            write!(f, "{} KB", b / KIB)
        } else {
            write!(f, "{b} B")
        }
    }
}
