// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI command implementations.

pub mod inspect;
pub mod run;

use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber based on verbosity level.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so that
/// `--json` output on stdout stays machine-readable.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parses a comma-separated dimension list such as `"2,3,5"`.
pub fn parse_dims(s: &str) -> anyhow::Result<Vec<usize>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>()
                .map_err(|e| anyhow::anyhow!("invalid dimension '{part}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dims() {
        assert_eq!(parse_dims("2,3,5").unwrap(), vec![2, 3, 5]);
        assert_eq!(parse_dims(" 7 ").unwrap(), vec![7]);
        assert_eq!(parse_dims("4, 1").unwrap(), vec![4, 1]);
    }

    #[test]
    fn test_parse_dims_rejects_garbage() {
        assert!(parse_dims("2,x").is_err());
        assert!(parse_dims("").is_err());
        assert!(parse_dims("-1").is_err());
    }
}
