//! Request validation for vet
//!
//! Validates one fully materialised JSON value against a checked
//! [`SchemaDefinition`] and produces a [`ValidationOutcome`]:
//! - `value`: only declared properties, defaults applied, transforms run
//! - `errors`: every violation found, one flat list
//!
//! # Design Principles
//!
//! - Never fails on bad input data; violations are returned, not raised
//! - Synchronous and stateless: safe to call concurrently against a shared
//!   schema without locking
//! - Output values are always fresh copies of the input

mod composite;
mod constraints;
mod driver;
mod errors;
mod hook;
pub mod primitive;

use serde::Serialize;
use serde_json::{json, Map, Value};

pub use driver::{validate_object_properties, validate_property, PropertyOutcome};
pub use errors::ValidationError;

use crate::schema::SchemaDefinition;

/// Options for a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Report top-level input keys the schema does not declare
    pub reject_unknown: bool,
}

impl ValidateOptions {
    pub fn strict() -> Self {
        Self {
            reject_unknown: true,
        }
    }
}

/// Sanitised value plus the violations found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub value: Map<String, Value>,
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    /// True when no violation was found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in report order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Errors as `{property, message}` pairs
    pub fn structured(&self) -> Vec<Value> {
        self.errors
            .iter()
            .map(|e| json!({ "property": e.property, "message": e.message }))
            .collect()
    }

    /// Sanitised value if valid, otherwise the errors
    pub fn into_result(self) -> Result<Map<String, Value>, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(self.errors)
        }
    }
}

/// Validates `input` against `schema` with default options.
pub fn validate(schema: &SchemaDefinition, input: &Value) -> ValidationOutcome {
    validate_with(schema, input, &ValidateOptions::default())
}

/// Validates `input` against `schema`.
///
/// A non-object `input` yields a single payload error and an empty value.
pub fn validate_with(
    schema: &SchemaDefinition,
    input: &Value,
    options: &ValidateOptions,
) -> ValidationOutcome {
    match input.as_object() {
        Some(object) => validate_object_properties(object, schema, options),
        None => ValidationOutcome {
            value: Map::new(),
            errors: vec![ValidationError::payload_not_object()],
        },
    }
}
