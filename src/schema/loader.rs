//! Schema loader for loading schema definitions from disk at startup
//!
//! - One file per schema: `<schema_dir>/<name>.json`
//! - Every file is parsed and checked once while loading
//! - Any malformed or invalid schema aborts loading (startup failure)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::checker::check_schema_definition;
use super::errors::{SchemaError, SchemaResult};
use super::parser::parse_schema_definition;
use super::types::SchemaDefinition;

/// Named registry of checked schema definitions.
///
/// Read-only once loading is finished; share it behind an `Arc` between
/// request handlers.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name
    schemas: BTreeMap<String, Arc<SchemaDefinition>>,
}

impl SchemaLoader {
    /// Creates a new schema loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// Files are visited in name order so that the first reported failure
    /// is the same on every run.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        let source = self.schema_dir.display().to_string();
        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(&source, format!("Failed to read schema directory: {}", e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(&source, format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        Ok(paths.len())
    }

    /// Loads a single schema file; the file stem becomes the schema name.
    pub fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let source = path.display().to_string();

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| SchemaError::malformed(&source, "File name is not valid UTF-8"))?
            .to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::malformed(&source, format!("Failed to read file: {}", e)))?;

        let raw: Value = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed(&source, format!("Invalid JSON: {}", e)))?;

        let schema = parse_schema_definition(&raw).map_err(|e| e.in_source(&source))?;

        self.insert(name, schema)
    }

    /// Registers a schema built in code (hooks included).
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaDefinition) -> SchemaResult<()> {
        let name = name.into();
        check_schema_definition(&schema).map_err(|e| e.in_source(&name))?;
        self.insert(name, schema)
    }

    fn insert(&mut self, name: String, schema: SchemaDefinition) -> SchemaResult<()> {
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::duplicate(name));
        }
        self.schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaDefinition>> {
        self.schemas.get(name).cloned()
    }

    /// Checks if a schema exists.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns all schema names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
