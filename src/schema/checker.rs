//! Schema definition checker
//!
//! Walks a [`SchemaDefinition`] once, normally at startup, and rejects
//! definitions the type system cannot rule out:
//! - defaults that do not match the declared type
//! - `min > max` (Number, Date) and `minLength > maxLength` (String, Array)
//! - non-finite numeric bounds or allowed values
//! - unparsable date bounds and allowed dates
//! - `toUpperCase` together with `toLowerCase`
//!
//! Nested schemas are checked with the same rules. Errors raised inside a
//! nested schema carry the top-level key.

use serde_json::Value;

use super::errors::{SchemaError, SchemaErrorCode, SchemaResult};
use super::types::{
    ArrayRules, Constraint, ConstraintKind, DateRules, ElementType, NumberRules, PrimitiveType,
    SchemaDefinition, StringRules,
};
use crate::validator::primitive::{json_type_name, parse_date};

/// Checks a schema definition.
///
/// The check is deterministic and has no side effects on the schema, so
/// checking an already-checked schema again succeeds again.
pub fn check_schema_definition(schema: &SchemaDefinition) -> SchemaResult<()> {
    for (key, constraint) in schema.iter() {
        check_constraint(key, constraint)?;
    }
    Ok(())
}

fn check_constraint(key: &str, constraint: &Constraint) -> SchemaResult<()> {
    if let Some(default) = &constraint.default {
        check_default(key, &constraint.kind, default)?;
    }

    match &constraint.kind {
        ConstraintKind::Boolean => Ok(()),
        ConstraintKind::Number(rules) => check_number(key, rules),
        ConstraintKind::String(rules) => check_string(key, rules),
        ConstraintKind::Date(rules) => check_date(key, rules),
        ConstraintKind::Object(schema) => {
            check_schema_definition(schema).map_err(|e| e.nested_in(key))
        }
        ConstraintKind::Array(rules) => check_array(key, rules),
    }
}

fn check_default(key: &str, kind: &ConstraintKind, default: &Value) -> SchemaResult<()> {
    if default.is_null() {
        return Ok(());
    }

    let matches = match kind {
        ConstraintKind::Boolean => default.is_boolean(),
        ConstraintKind::Number(_) => default.is_number(),
        ConstraintKind::String(_) => default.is_string(),
        ConstraintKind::Date(_) => default.as_str().and_then(parse_date).is_some(),
        ConstraintKind::Object(_) => {
            return Err(SchemaError::new(
                SchemaErrorCode::TypeMismatch,
                key,
                "default of an Object property may only be null",
            ));
        }
        ConstraintKind::Array(rules) => match default.as_array() {
            Some(items) => items.iter().all(|item| element_matches(&rules.of_type, item)),
            None => false,
        },
    };

    if matches {
        Ok(())
    } else {
        Err(SchemaError::new(
            SchemaErrorCode::TypeMismatch,
            key,
            format!(
                "default must match type {}, got {}",
                kind.type_name(),
                json_type_name(default)
            ),
        ))
    }
}

fn element_matches(of_type: &ElementType, item: &Value) -> bool {
    match of_type {
        ElementType::Primitive(PrimitiveType::Boolean) => item.is_boolean(),
        ElementType::Primitive(PrimitiveType::Number) => item.is_number(),
        ElementType::Primitive(PrimitiveType::String) => item.is_string(),
        ElementType::Primitive(PrimitiveType::Date) => item.as_str().and_then(parse_date).is_some(),
        ElementType::Object(_) => item.is_object(),
    }
}

fn check_number(key: &str, rules: &NumberRules) -> SchemaResult<()> {
    for (name, bound) in [("min", rules.min), ("max", rules.max)] {
        if let Some(bound) = bound {
            if !bound.is_finite() {
                return Err(SchemaError::new(
                    SchemaErrorCode::TypeMismatch,
                    key,
                    format!("{} must be a finite number", name),
                ));
            }
        }
    }

    if let (Some(min), Some(max)) = (rules.min, rules.max) {
        if min > max {
            return Err(SchemaError::new(
                SchemaErrorCode::InvalidRange,
                key,
                format!("min ({}) must not exceed max ({})", min, max),
            ));
        }
    }

    if let Some(values) = &rules.values {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(SchemaError::new(
                SchemaErrorCode::InvalidValues,
                key,
                format!("values must contain only finite numbers, got {}", bad),
            ));
        }
    }

    Ok(())
}

fn check_string(key: &str, rules: &StringRules) -> SchemaResult<()> {
    check_lengths(key, rules.min_length, rules.max_length)?;

    if rules.to_upper_case && rules.to_lower_case {
        return Err(SchemaError::new(
            SchemaErrorCode::InvalidFlag,
            key,
            "toUpperCase and toLowerCase cannot both be set",
        ));
    }

    Ok(())
}

fn check_date(key: &str, rules: &DateRules) -> SchemaResult<()> {
    let min = parse_bound(key, "min", rules.min.as_deref())?;
    let max = parse_bound(key, "max", rules.max.as_deref())?;

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(SchemaError::new(
                SchemaErrorCode::InvalidRange,
                key,
                format!(
                    "min ({}) must not be after max ({})",
                    rules.min.as_deref().unwrap_or_default(),
                    rules.max.as_deref().unwrap_or_default()
                ),
            ));
        }
    }

    if let Some(values) = &rules.values {
        if let Some(bad) = values.iter().find(|v| parse_date(v).is_none()) {
            return Err(SchemaError::new(
                SchemaErrorCode::InvalidValues,
                key,
                format!("values must contain only date strings, got '{}'", bad),
            ));
        }
    }

    Ok(())
}

fn parse_bound(
    key: &str,
    name: &str,
    bound: Option<&str>,
) -> SchemaResult<Option<chrono::DateTime<chrono::Utc>>> {
    match bound {
        None => Ok(None),
        Some(raw) => parse_date(raw).map(Some).ok_or_else(|| {
            SchemaError::new(
                SchemaErrorCode::TypeMismatch,
                key,
                format!("{} must be a date string, got '{}'", name, raw),
            )
        }),
    }
}

fn check_array(key: &str, rules: &ArrayRules) -> SchemaResult<()> {
    check_lengths(key, rules.min_length, rules.max_length)?;

    if let ElementType::Object(schema) = &rules.of_type {
        check_schema_definition(schema).map_err(|e| e.nested_in(key))?;
    }

    Ok(())
}

fn check_lengths(key: &str, min: Option<usize>, max: Option<usize>) -> SchemaResult<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(SchemaError::new(
                SchemaErrorCode::InvalidRange,
                key,
                format!("minLength ({}) must not exceed maxLength ({})", min, max),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_schema_passes_twice() {
        let schema = SchemaDefinition::new()
            .with("name", Constraint::string(StringRules::new().trim()).required())
            .with("age", Constraint::number(NumberRules::new().min(0.0).max(120.0)))
            .with("born", Constraint::date(DateRules::new().min("1900-01-01")));

        assert!(check_schema_definition(&schema).is_ok());
        assert!(check_schema_definition(&schema).is_ok());
    }

    #[test]
    fn test_number_min_above_max() {
        let schema = SchemaDefinition::new()
            .with("age", Constraint::number(NumberRules::new().min(10.0).max(1.0)));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidRange);
        assert_eq!(err.key(), Some("age"));
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let schema = SchemaDefinition::new()
            .with("x", Constraint::number(NumberRules::new().max(f64::NAN)));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
    }

    #[test]
    fn test_string_length_range() {
        let schema = SchemaDefinition::new().with(
            "code",
            Constraint::string(StringRules::new().min_length(5).max_length(2)),
        );

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidRange);
    }

    #[test]
    fn test_case_flags_exclusive() {
        let schema = SchemaDefinition::new().with(
            "code",
            Constraint::string(StringRules::new().to_upper_case().to_lower_case()),
        );

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidFlag);
    }

    #[test]
    fn test_default_type_mismatch() {
        let schema = SchemaDefinition::new()
            .with("flag", Constraint::boolean().with_default(json!("yes")));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
        assert_eq!(err.key(), Some("flag"));
    }

    #[test]
    fn test_null_default_allowed_everywhere() {
        let schema = SchemaDefinition::new()
            .with("flag", Constraint::boolean().with_default(Value::Null))
            .with("doc", Constraint::object(SchemaDefinition::new()).with_default(Value::Null));

        assert!(check_schema_definition(&schema).is_ok());
    }

    #[test]
    fn test_object_default_must_be_null() {
        let schema = SchemaDefinition::new()
            .with("doc", Constraint::object(SchemaDefinition::new()).with_default(json!({})));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
    }

    #[test]
    fn test_array_default_elements_checked() {
        let ok = SchemaDefinition::new().with(
            "tags",
            Constraint::array_of(PrimitiveType::String).with_default(json!(["a", "b"])),
        );
        assert!(check_schema_definition(&ok).is_ok());

        let bad = SchemaDefinition::new().with(
            "tags",
            Constraint::array_of(PrimitiveType::String).with_default(json!(["a", 1])),
        );
        assert!(check_schema_definition(&bad).is_err());
    }

    #[test]
    fn test_date_bounds_must_parse() {
        let schema = SchemaDefinition::new()
            .with("born", Constraint::date(DateRules::new().min("yesterday")));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
    }

    #[test]
    fn test_date_min_after_max() {
        let schema = SchemaDefinition::new().with(
            "born",
            Constraint::date(DateRules::new().min("2020-01-01").max("2019-01-01")),
        );

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidRange);
    }

    #[test]
    fn test_nested_error_tagged_with_outer_key() {
        let street = SchemaDefinition::new().with(
            "zip",
            Constraint::string(StringRules::new().min_length(9).max_length(3)),
        );
        let address = SchemaDefinition::new().with("street", Constraint::object(street));
        let schema = SchemaDefinition::new()
            .with("name", Constraint::string(StringRules::new()))
            .with("address", Constraint::array_of_objects(address));

        let err = check_schema_definition(&schema).unwrap_err();
        assert_eq!(err.key(), Some("address"));
        assert_eq!(err.path(), &["street".to_string(), "zip".to_string()]);
        assert_eq!(err.code(), SchemaErrorCode::InvalidRange);
    }
}
