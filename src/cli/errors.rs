//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::schema::SchemaError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("VET_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// stdin/stdout or input file failure
    #[error("VET_CLI_IO_ERROR: {0}")]
    Io(String),

    /// A schema failed to load or check
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// No schema with the requested name
    #[error("VET_CLI_UNKNOWN_SCHEMA: no schema named '{0}'")]
    UnknownSchema(String),

    /// The document was validated and had errors
    #[error("VET_CLI_INVALID_INPUT: document failed validation with {0} error(s)")]
    InvalidInput(usize),

    /// Runtime or server startup failure
    #[error("VET_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 1,
            _ => 2,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}
