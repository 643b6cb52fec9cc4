//! CLI argument definitions using clap
//!
//! Commands:
//! - vet check --schemas <dir>
//! - vet validate --schemas <dir> --schema <name> [--input <file>] [--strict]
//! - vet serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vet - declarative validation and sanitisation of JSON payloads
#[derive(Parser, Debug)]
#[command(name = "vet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and check every schema in a directory
    Check {
        /// Directory of *.json schema files
        #[arg(long)]
        schemas: PathBuf,
    },

    /// Validate a single JSON document and print the outcome
    Validate {
        /// Directory of *.json schema files
        #[arg(long)]
        schemas: PathBuf,

        /// Name of the schema to validate against (file stem)
        #[arg(long)]
        schema: String,

        /// Input document; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report undeclared top-level properties as errors
        #[arg(long)]
        strict: bool,
    },

    /// Start the HTTP request gate
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./vet.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
