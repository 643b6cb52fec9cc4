//! CLI command implementations
//!
//! `check` and `serve` follow the same startup order:
//! 1. Configuration load (serve only)
//! 2. Schema load and check
//! 3. Serve (serve only)
//!
//! A schema error at step 2 is fatal; nothing is served.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::schema::SchemaLoader;
use crate::validator::{validate_with, ValidateOptions};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_json};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema directory (required)
    pub schema_dir: String,

    /// HTTP gate settings
    #[serde(flatten)]
    pub server: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }

    /// Get schema directory as Path
    pub fn schema_path(&self) -> &Path {
        Path::new(&self.schema_dir)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { schemas } => check(&schemas),
        Command::Validate {
            schemas,
            schema,
            input,
            strict,
        } => validate(&schemas, &schema, input.as_deref(), strict),
        Command::Serve { config } => serve(&config),
    }
}

/// Load and check every schema in `dir`
///
/// A failing schema is logged as a fatal event and returned.
pub fn load_schemas(dir: &Path) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(dir);

    match loader.load_all() {
        Ok(count) => {
            log_event_with_fields(
                Event::SchemasLoaded,
                &[("count", &count.to_string()), ("dir", &dir.display().to_string())],
            );
            Ok(loader)
        }
        Err(e) => {
            log_event_with_fields(
                Event::SchemaRejected,
                &[("code", e.code().code()), ("message", e.message())],
            );
            Err(e.into())
        }
    }
}

/// Check a schema directory
///
/// Prints one line per loaded schema.
pub fn check(schemas: &Path) -> CliResult<()> {
    let loader = load_schemas(schemas)?;

    for name in loader.names() {
        let properties = loader.get(name).map_or(0, |schema| schema.len());
        write_json(&json!({ "schema": name, "properties": properties }))?;
    }

    Ok(())
}

/// Validate a single document and print `{"value": …, "errors": [...]}`
///
/// Nothing else is written to stdout so the output can be piped. Returns
/// `CliError::InvalidInput` after printing when the document had errors.
pub fn validate(
    schemas: &Path,
    schema: &str,
    input: Option<&Path>,
    strict: bool,
) -> CliResult<()> {
    let mut loader = SchemaLoader::new(schemas);
    loader.load_all()?;

    let definition = loader
        .get(schema)
        .ok_or_else(|| CliError::UnknownSchema(schema.to_string()))?;

    let document = read_document(input)?;
    let options = ValidateOptions {
        reject_unknown: strict,
    };
    let outcome = validate_with(&definition, &document, &options);

    write_json(&outcome)?;

    if outcome.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(outcome.errors.len()))
    }
}

/// Start the HTTP request gate
pub fn serve(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", &config_path.display().to_string())],
    );

    let schema_dir = PathBuf::from(config.schema_path());
    let loader = load_schemas(&schema_dir)?;

    let server = HttpServer::with_config(config.server, loader);
    log_event(Event::BootComplete);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
