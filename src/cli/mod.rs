//! CLI module for vet
//!
//! Provides command-line interface for:
//! - check: Load and check a schema directory
//! - validate: One-shot validation of a JSON document
//! - serve: Start the HTTP request gate

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, load_schemas, run, run_command, serve, validate, Config};
pub use errors::{CliError, CliResult};
pub use io::{read_document, write_json};
