//! Whole-object validation driver
//!
//! For each declared key, in declaration order, exactly one of these holds:
//! - absent with a default: the default is output unchecked
//! - absent and required: one required error
//! - absent otherwise: skipped
//! - present: type check, constraints, then the custom hook
//!
//! Explicit `null` is a required error for required properties and is
//! output as `null` otherwise. All top-level properties are attempted;
//! their errors are collected into one flat list.

use serde_json::{Map, Value};

use super::composite::{validate_array, validate_nested_object};
use super::constraints::{apply_date, apply_number, apply_string};
use super::errors::ValidationError;
use super::hook::run_hook;
use super::primitive::{check_boolean, check_date, check_number, check_string};
use super::{ValidateOptions, ValidationOutcome};
use crate::schema::{Constraint, ConstraintKind, SchemaDefinition};

/// Result of validating a single property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOutcome {
    /// Omitted from the output
    Absent,
    Valid(Value),
    Invalid(Vec<ValidationError>),
}

/// Validates every declared property of `input` against `schema`.
pub fn validate_object_properties(
    input: &Map<String, Value>,
    schema: &SchemaDefinition,
    options: &ValidateOptions,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for (key, constraint) in schema.iter() {
        match validate_property(key, input.get(key), constraint) {
            PropertyOutcome::Absent => {}
            PropertyOutcome::Valid(value) => {
                outcome.value.insert(key.to_string(), value);
            }
            PropertyOutcome::Invalid(errors) => outcome.errors.extend(errors),
        }
    }

    if options.reject_unknown {
        for key in input.keys() {
            if !schema.contains_key(key) {
                outcome.errors.push(ValidationError::unknown(key));
            }
        }
    }

    outcome
}

/// Validates one property; `value` is `None` when the key is absent.
pub fn validate_property(key: &str, value: Option<&Value>, constraint: &Constraint) -> PropertyOutcome {
    let value = match value {
        None => {
            return match (&constraint.default, constraint.required) {
                (Some(default), _) => PropertyOutcome::Valid(default.clone()),
                (None, true) => PropertyOutcome::Invalid(vec![ValidationError::required(key)]),
                (None, false) => PropertyOutcome::Absent,
            };
        }
        Some(Value::Null) if constraint.required => {
            return PropertyOutcome::Invalid(vec![ValidationError::required(key)]);
        }
        Some(Value::Null) => return PropertyOutcome::Valid(Value::Null),
        Some(value) => value,
    };

    let checked = check_value(key, value, &constraint.kind)
        .and_then(|value| run_hook(key, constraint.validate.as_ref(), value).map_err(single));

    match checked {
        Ok(value) => PropertyOutcome::Valid(value),
        Err(errors) => PropertyOutcome::Invalid(errors),
    }
}

fn check_value(key: &str, value: &Value, kind: &ConstraintKind) -> Result<Value, Vec<ValidationError>> {
    match kind {
        ConstraintKind::Boolean => check_boolean(key, value)
            .map(|_| value.clone())
            .map_err(single),
        ConstraintKind::Number(rules) => check_number(key, value)
            .and_then(|number| apply_number(key, value, number, rules))
            .map_err(single),
        ConstraintKind::String(rules) => check_string(key, value)
            .and_then(|text| apply_string(key, text, rules))
            .map_err(single),
        ConstraintKind::Date(rules) => check_date(key, value)
            .and_then(|(raw, parsed)| apply_date(key, raw, parsed, rules))
            .map_err(single),
        ConstraintKind::Object(schema) => validate_nested_object(key, value, schema),
        ConstraintKind::Array(rules) => validate_array(key, value, rules),
    }
}

fn single(error: ValidationError) -> Vec<ValidationError> {
    vec![error]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberRules, StringRules};
    use serde_json::json;

    #[test]
    fn test_absent_states() {
        let plain = Constraint::string(StringRules::new());
        assert_eq!(validate_property("a", None, &plain), PropertyOutcome::Absent);

        let defaulted = Constraint::string(StringRules::new()).with_default(json!("x"));
        assert_eq!(
            validate_property("a", None, &defaulted),
            PropertyOutcome::Valid(json!("x"))
        );

        let required = Constraint::string(StringRules::new()).required();
        assert_eq!(
            validate_property("a", None, &required),
            PropertyOutcome::Invalid(vec![ValidationError::required("a")])
        );
    }

    #[test]
    fn test_default_wins_over_required() {
        let c = Constraint::number(NumberRules::new()).required().with_default(json!(5));
        assert_eq!(validate_property("n", None, &c), PropertyOutcome::Valid(json!(5)));
    }

    #[test]
    fn test_default_bypasses_checks() {
        let c = Constraint::string(StringRules::new().to_upper_case()).with_default(json!("low"));
        assert_eq!(validate_property("s", None, &c), PropertyOutcome::Valid(json!("low")));
    }

    #[test]
    fn test_explicit_null() {
        let optional = Constraint::number(NumberRules::new());
        assert_eq!(
            validate_property("n", Some(&Value::Null), &optional),
            PropertyOutcome::Valid(Value::Null)
        );

        let required = Constraint::number(NumberRules::new()).required();
        assert_eq!(
            validate_property("n", Some(&Value::Null), &required),
            PropertyOutcome::Invalid(vec![ValidationError::required("n")])
        );
    }

    #[test]
    fn test_hook_sees_processed_value() {
        let c = Constraint::string(StringRules::new().trim())
            .with_hook(|v| match v.as_str() {
                Some("ok") => Ok(json!("OK")),
                _ => Err("Expected ok.".to_string()),
            });

        assert_eq!(
            validate_property("s", Some(&json!("  ok ")), &c),
            PropertyOutcome::Valid(json!("OK"))
        );
    }

    #[test]
    fn test_hook_not_run_after_failure() {
        let c = Constraint::number(NumberRules::new().max(1.0))
            .with_hook(|_| Err("hook ran".to_string()));

        match validate_property("n", Some(&json!(2)), &c) {
            PropertyOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(!errors[0].message.contains("hook ran"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keys_only_when_strict() {
        let schema = SchemaDefinition::new().with("a", Constraint::boolean());
        let input = json!({ "a": true, "b": 1 });
        let input = input.as_object().unwrap();

        let lenient = validate_object_properties(input, &schema, &ValidateOptions::default());
        assert!(lenient.errors.is_empty());
        assert_eq!(lenient.value, *json!({ "a": true }).as_object().unwrap());

        let strict = validate_object_properties(
            input,
            &schema,
            &ValidateOptions { reject_unknown: true },
        );
        assert_eq!(strict.errors, vec![ValidationError::unknown("b")]);
    }
}
