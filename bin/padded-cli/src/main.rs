// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # padded
//!
//! Command-line interface for the padded-tensor engine.
//!
//! ## Usage
//! ```bash
//! # Run a tensor job described in TOML
//! padded run --job ./jobs/matmul.toml
//!
//! # Same, printing the result as JSON
//! padded run --job ./jobs/matmul.toml --json
//!
//! # Show how a shape is laid out in padded storage
//! padded inspect --shape 2,3,5
//! ```

mod budget;
mod commands;
mod config;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "padded",
    about = "Lane-padded f32 tensor engine",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tensor job described by a TOML file.
    Run {
        /// Path to the job file.
        #[arg(short, long)]
        job: std::path::PathBuf,

        /// Print the result as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the padded layout of a shape.
    Inspect {
        /// Comma-separated dimensions (e.g., "2,3,5").
        #[arg(short, long)]
        shape: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { job, json } => commands::run::execute(job, json),
        Commands::Inspect { shape } => commands::inspect::execute(shape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["padded", "-vv", "run", "--job", "a.toml", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run { job, json } => {
                assert_eq!(job, std::path::PathBuf::from("a.toml"));
                assert!(json);
            }
            Commands::Inspect { .. } => panic!("expected run"),
        }
    }
}
