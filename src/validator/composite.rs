//! Object and array validators
//!
//! Nested objects are validated by the whole-object driver; their error
//! messages are surfaced verbatim, reported against the outer property.
//! Arrays check their length first, then their elements, stopping at the
//! first invalid element. Both always return freshly built values.

use serde_json::Value;

use super::driver::validate_object_properties;
use super::errors::ValidationError;
use super::primitive::matches_primitive;
use super::ValidateOptions;
use crate::schema::{ArrayRules, ElementType, SchemaDefinition};

/// Validates a present, non-null value against a nested schema.
pub fn validate_nested_object(
    key: &str,
    value: &Value,
    schema: &SchemaDefinition,
) -> Result<Value, Vec<ValidationError>> {
    let object = value
        .as_object()
        .ok_or_else(|| vec![ValidationError::not_nested_object(key)])?;

    let outcome = validate_object_properties(object, schema, &ValidateOptions::default());
    if outcome.errors.is_empty() {
        Ok(Value::Object(outcome.value))
    } else {
        Err(outcome
            .errors
            .into_iter()
            .map(|e| e.reported_as(key))
            .collect())
    }
}

/// Validates a present, non-null value against array rules.
pub fn validate_array(
    key: &str,
    value: &Value,
    rules: &ArrayRules,
) -> Result<Value, Vec<ValidationError>> {
    let items = value
        .as_array()
        .ok_or_else(|| vec![ValidationError::not_array(key)])?;

    if let Some(min) = rules.min_length {
        if items.len() < min {
            return Err(vec![ValidationError::too_few_items(key, min)]);
        }
    }
    if let Some(max) = rules.max_length {
        if items.len() > max {
            return Err(vec![ValidationError::too_many_items(key, max)]);
        }
    }

    match &rules.of_type {
        ElementType::Primitive(kind) => {
            if let Some(index) = items.iter().position(|item| !matches_primitive(*kind, item)) {
                return Err(vec![ValidationError::invalid_element(key, kind.plural(), index)]);
            }
            Ok(Value::Array(items.clone()))
        }
        ElementType::Object(schema) => {
            // elements follow the optional Object rules: null stays null
            let mut validated = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    validated.push(Value::Null);
                } else {
                    validated.push(validate_nested_object(key, item, schema)?);
                }
            }
            Ok(Value::Array(validated))
        }
    }
}
