//! JSON schema definitions
//!
//! Turns an untyped JSON value claiming to be a schema definition into a
//! checked [`SchemaDefinition`]:
//!
//! ```json
//! {
//!   "name": { "type": "String", "required": true, "trim": true },
//!   "tags": { "type": "Array", "ofType": "String", "maxLength": 5 }
//! }
//! ```
//!
//! Each declaration is decoded into a `RawDeclaration` tagged by `type`.
//! Structural defects (unknown tags, wrong value kinds, constraint keys
//! that do not apply to the declared type) are reported here; semantic
//! ones (`min > max`, default agreement, ...) by the checker afterwards.

use regex::Regex;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::checker::check_schema_definition;
use super::errors::{SchemaError, SchemaErrorCode, SchemaResult};
use super::types::{
    ArrayRules, Constraint, ConstraintKind, DateRules, ElementType, NumberRules, PrimitiveType,
    SchemaDefinition, StringRules,
};
use crate::validator::primitive::json_type_name;

/// Prefixes tagging decode errors raised by the field adapters below.
const FLAG_ERROR: &str = "flag ";
const VALUES_ERROR: &str = "values ";

/// One property declaration as written in JSON
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawDeclaration {
    Boolean(RawBoolean),
    Number(RawNumber),
    String(RawString),
    Date(RawDate),
    Object(RawObject),
    Array(RawArray),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBoolean {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNumber {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    trunc: bool,
    #[serde(default, deserialize_with = "values")]
    values: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawString {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    #[serde(rename = "match")]
    pattern: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    trim: bool,
    #[serde(default, deserialize_with = "flag")]
    to_upper_case: bool,
    #[serde(default, deserialize_with = "flag")]
    to_lower_case: bool,
    #[serde(default, deserialize_with = "values")]
    values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDate {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    min: Option<String>,
    max: Option<String>,
    #[serde(default, deserialize_with = "values")]
    values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawObject {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawArray {
    #[serde(default, deserialize_with = "flag")]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    of_type: Option<String>,
    schema: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

/// `"default": null` is a declared default, unlike a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    bool::deserialize(deserializer).map_err(|e| D::Error::custom(format!("{}{}", FLAG_ERROR, e)))
}

fn values<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        other => {
            return Err(D::Error::custom(format!(
                "{}must be an array, got {}",
                VALUES_ERROR,
                json_type_name(&other)
            )));
        }
    };

    items
        .into_iter()
        .map(|item| {
            let shown = item.to_string();
            T::deserialize(item).map_err(|e| {
                D::Error::custom(format!("{}entry {} is invalid: {}", VALUES_ERROR, shown, e))
            })
        })
        .collect::<Result<Vec<T>, D::Error>>()
        .map(Some)
}

/// Parses and checks a JSON schema definition.
pub fn parse_schema_definition(raw: &Value) -> SchemaResult<SchemaDefinition> {
    let schema = parse_definition(raw)?;
    check_schema_definition(&schema)?;
    Ok(schema)
}

fn parse_definition(raw: &Value) -> SchemaResult<SchemaDefinition> {
    let properties = raw
        .as_object()
        .ok_or_else(|| SchemaError::not_an_object(json_type_name(raw)))?;

    let mut schema = SchemaDefinition::new();
    for (key, decl) in properties {
        schema.insert(key.as_str(), parse_constraint(key, decl)?);
    }
    Ok(schema)
}

fn parse_constraint(key: &str, decl: &Value) -> SchemaResult<Constraint> {
    let type_name = check_tag(key, decl)?;
    let raw = RawDeclaration::deserialize(decl).map_err(|e| decode_error(key, type_name, e))?;

    let (kind, required, default) = match raw {
        RawDeclaration::Boolean(raw) => (ConstraintKind::Boolean, raw.required, raw.default),
        RawDeclaration::Number(raw) => (
            ConstraintKind::Number(NumberRules {
                min: raw.min,
                max: raw.max,
                trunc: raw.trunc,
                values: raw.values,
            }),
            raw.required,
            raw.default,
        ),
        RawDeclaration::String(raw) => {
            let pattern = raw
                .pattern
                .as_deref()
                .map(|source| compile(key, source))
                .transpose()?;
            (
                ConstraintKind::String(StringRules {
                    min_length: raw.min_length,
                    max_length: raw.max_length,
                    pattern,
                    trim: raw.trim,
                    to_upper_case: raw.to_upper_case,
                    to_lower_case: raw.to_lower_case,
                    values: raw.values,
                }),
                raw.required,
                raw.default,
            )
        }
        RawDeclaration::Date(raw) => (
            ConstraintKind::Date(DateRules {
                min: raw.min,
                max: raw.max,
                values: raw.values,
            }),
            raw.required,
            raw.default,
        ),
        RawDeclaration::Object(raw) => {
            let schema = parse_sub_schema(
                key,
                raw.schema.as_ref(),
                "Object properties require a schema",
            )?;
            (ConstraintKind::Object(schema), raw.required, raw.default)
        }
        RawDeclaration::Array(raw) => {
            let rules = parse_array(key, &raw)?;
            (ConstraintKind::Array(rules), raw.required, raw.default)
        }
    };

    let mut constraint = Constraint::new(kind);
    constraint.required = required;
    constraint.default = default;
    Ok(constraint)
}

/// Checks what the tagged decode cannot tell apart: a null or non-object
/// declaration, a `validate` key, and a missing or unknown `type`.
fn check_tag<'a>(key: &str, decl: &'a Value) -> SchemaResult<&'a str> {
    let decl: &Map<String, Value> = match decl {
        Value::Null => {
            return Err(SchemaError::new(
                SchemaErrorCode::MissingDeclaration,
                key,
                "declaration must not be null",
            ));
        }
        Value::Object(decl) => decl,
        other => {
            return Err(SchemaError::new(
                SchemaErrorCode::MissingType,
                key,
                format!("declaration must be an object with a type, got {}", json_type_name(other)),
            ));
        }
    };

    if decl.contains_key("validate") {
        return Err(SchemaError::new(
            SchemaErrorCode::NotCallable,
            key,
            "validate must be a function and cannot be declared in JSON",
        ));
    }

    match decl.get("type") {
        None | Some(Value::Null) => Err(SchemaError::new(
            SchemaErrorCode::MissingType,
            key,
            "declaration has no type",
        )),
        Some(Value::String(name)) if is_type_tag(name) => Ok(name.as_str()),
        Some(Value::String(name)) => Err(SchemaError::new(
            SchemaErrorCode::UnknownType,
            key,
            format!("unsupported type '{}'", name),
        )),
        Some(other) => Err(SchemaError::new(
            SchemaErrorCode::UnknownType,
            key,
            format!("type must be a type name, got {}", json_type_name(other)),
        )),
    }
}

fn is_type_tag(name: &str) -> bool {
    matches!(name, "Object" | "Array") || PrimitiveType::from_name(name).is_some()
}

/// Maps a decode failure to the code of the offending constraint.
fn decode_error(key: &str, type_name: &str, err: serde_json::Error) -> SchemaError {
    let message = err.to_string();

    if let Some(reason) = message.strip_prefix(FLAG_ERROR) {
        return SchemaError::new(
            SchemaErrorCode::InvalidFlag,
            key,
            format!("flags must be booleans: {}", reason),
        );
    }
    if let Some(reason) = message.strip_prefix(VALUES_ERROR) {
        return SchemaError::new(SchemaErrorCode::InvalidValues, key, format!("values {}", reason));
    }
    if message.starts_with("unknown field") {
        return SchemaError::new(
            SchemaErrorCode::UnsupportedConstraint,
            key,
            format!("{} for type {}", message, type_name),
        );
    }
    SchemaError::new(SchemaErrorCode::TypeMismatch, key, message)
}

fn compile(key: &str, source: &str) -> SchemaResult<Regex> {
    Regex::new(source).map_err(|e| {
        SchemaError::new(
            SchemaErrorCode::InvalidPattern,
            key,
            format!("match is not a valid pattern: {}", e),
        )
    })
}

fn parse_sub_schema(
    key: &str,
    schema: Option<&Value>,
    missing: &str,
) -> SchemaResult<SchemaDefinition> {
    match schema {
        None | Some(Value::Null) => Err(SchemaError::new(
            SchemaErrorCode::MissingSubSchema,
            key,
            missing,
        )),
        Some(raw) => parse_definition(raw).map_err(|e| match e.key() {
            Some(_) => e.nested_in(key),
            None => SchemaError::new(SchemaErrorCode::NotAnObject, key, e.message()),
        }),
    }
}

fn parse_array(key: &str, raw: &RawArray) -> SchemaResult<ArrayRules> {
    let of_type = match raw.of_type.as_deref() {
        None => {
            return Err(SchemaError::new(
                SchemaErrorCode::MissingSubSchema,
                key,
                "Array properties require ofType",
            ));
        }
        Some("Object") => ElementType::Object(parse_sub_schema(
            key,
            raw.schema.as_ref(),
            "Arrays of Object require a schema",
        )?),
        Some(name) => {
            let primitive = PrimitiveType::from_name(name).ok_or_else(|| {
                SchemaError::new(
                    SchemaErrorCode::UnknownType,
                    key,
                    format!("unsupported ofType '{}'", name),
                )
            })?;
            if raw.schema.is_some() {
                return Err(SchemaError::new(
                    SchemaErrorCode::UnsupportedConstraint,
                    key,
                    format!("schema only applies to arrays of Object, not {}", primitive),
                ));
            }
            ElementType::Primitive(primitive)
        }
    };

    Ok(ArrayRules {
        of_type,
        min_length: raw.min_length,
        max_length: raw.max_length,
    })
}
