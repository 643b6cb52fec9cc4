//! Constraint checker
//!
//! Runs after the primitive type check, in a fixed order per type:
//! 1. mutations (`trunc`; `trim`, `toUpperCase`, `toLowerCase`)
//! 2. ranges (`min`/`max`, `minLength`/`maxLength`, all inclusive)
//! 3. pattern (`match`, tested on the transformed string)
//! 4. enumeration (`values`, tested on the final value)
//!
//! The first failing step ends the checks for the property.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use super::errors::ValidationError;
use super::primitive::parse_date;
use crate::schema::{DateRules, NumberRules, StringRules};

/// Applies number constraints to an already type-checked number.
pub fn apply_number(
    key: &str,
    value: &Value,
    number: f64,
    rules: &NumberRules,
) -> Result<Value, ValidationError> {
    let (value, number) = if rules.trunc && number.fract() != 0.0 {
        let truncated = number.trunc();
        (number_value(truncated), truncated)
    } else {
        (value.clone(), number)
    };

    if let Some(min) = rules.min {
        if number < min {
            return Err(ValidationError::below_min(key, min));
        }
    }
    if let Some(max) = rules.max {
        if number > max {
            return Err(ValidationError::above_max(key, max));
        }
    }

    if let Some(values) = &rules.values {
        if !values.iter().any(|allowed| *allowed == number) {
            return Err(ValidationError::not_in_values(key, &display_value(&value)));
        }
    }

    Ok(value)
}

/// Applies string constraints to an already type-checked string.
pub fn apply_string(key: &str, raw: &str, rules: &StringRules) -> Result<Value, ValidationError> {
    let mut text = if rules.trim {
        raw.trim().to_string()
    } else {
        raw.to_string()
    };
    if rules.to_upper_case {
        text = text.to_uppercase();
    } else if rules.to_lower_case {
        text = text.to_lowercase();
    }

    let length = text.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            return Err(ValidationError::too_short(key, min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            return Err(ValidationError::too_long(key, max));
        }
    }

    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(&text) {
            return Err(ValidationError::pattern_mismatch(key, pattern.as_str()));
        }
    }

    if let Some(values) = &rules.values {
        if !values.contains(&text) {
            return Err(ValidationError::not_in_values(key, &text));
        }
    }

    Ok(Value::String(text))
}

/// Applies date constraints. The stored value stays the original string.
pub fn apply_date(
    key: &str,
    raw: &str,
    parsed: DateTime<Utc>,
    rules: &DateRules,
) -> Result<Value, ValidationError> {
    if let Some(min) = rules.min.as_deref() {
        if parse_date(min).map_or(false, |bound| parsed < bound) {
            return Err(ValidationError::before_min_date(key, min));
        }
    }
    if let Some(max) = rules.max.as_deref() {
        if parse_date(max).map_or(false, |bound| parsed > bound) {
            return Err(ValidationError::after_max_date(key, max));
        }
    }

    if let Some(values) = &rules.values {
        if !values.iter().any(|allowed| allowed == raw) {
            return Err(ValidationError::not_in_values(key, raw));
        }
    }

    Ok(Value::String(raw.to_string()))
}

/// Integral numbers are stored as JSON integers so `3.75` truncates to `3`.
fn number_value(number: f64) -> Value {
    if number >= i64::MIN as f64 && number <= i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

/// Strings are shown bare, floats without a trailing `.0`, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| f.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn number(value: Value, rules: &NumberRules) -> Result<Value, ValidationError> {
        let n = value.as_f64().unwrap();
        apply_number("n", &value, n, rules)
    }

    #[test]
    fn test_trunc_toward_zero() {
        let rules = NumberRules::new().trunc();
        assert_eq!(number(json!(3.75), &rules).unwrap(), json!(3));
        assert_eq!(number(json!(-3.75), &rules).unwrap(), json!(-3));
        assert_eq!(number(json!(3.75), &NumberRules::new()).unwrap(), json!(3.75));
    }

    #[test]
    fn test_trunc_before_range() {
        let rules = NumberRules::new().trunc().max(3.0);
        assert_eq!(number(json!(3.9), &rules).unwrap(), json!(3));
    }

    #[test]
    fn test_inclusive_bounds() {
        let rules = NumberRules::new().min(0.0).max(120.0);
        assert!(number(json!(0), &rules).is_ok());
        assert!(number(json!(120), &rules).is_ok());
        assert_eq!(
            number(json!(200), &rules).unwrap_err().message,
            "Property \"n\" is above the maximum value of 120."
        );
        assert_eq!(
            number(json!(-1), &rules).unwrap_err().message,
            "Property \"n\" is below the minimum value of 0."
        );
    }

    #[test]
    fn test_number_values() {
        let rules = NumberRules::new().values([1.0, 2.0]);
        assert!(number(json!(2), &rules).is_ok());
        assert_eq!(
            number(json!(3), &rules).unwrap_err().message,
            "Property \"n\" has an invalid value of 3."
        );
    }

    #[test]
    fn test_number_values_integral_float_message() {
        let rules = NumberRules::new().values([1.0, 2.0]);
        assert_eq!(
            number(json!(3.0), &rules).unwrap_err().message,
            "Property \"n\" has an invalid value of 3."
        );
        assert_eq!(
            number(json!(2.5), &rules).unwrap_err().message,
            "Property \"n\" has an invalid value of 2.5."
        );
    }

    #[test]
    fn test_string_transforms_then_length() {
        let rules = StringRules::new().trim().to_upper_case().max_length(3);
        assert_eq!(apply_string("s", "  abc  ", &rules).unwrap(), json!("ABC"));
        assert!(apply_string("s", " abcd ", &rules).is_err());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let rules = StringRules::new().min_length(2).max_length(2);
        assert!(apply_string("s", "éà", &rules).is_ok());
        assert_eq!(
            apply_string("s", "é", &rules).unwrap_err().message,
            "Property \"s\" is shorter than the minimum length of 2."
        );
    }

    #[test]
    fn test_pattern_on_transformed_value() {
        let rules = StringRules::new()
            .to_lower_case()
            .pattern(Regex::new("^[a-z]+$").unwrap());
        assert_eq!(apply_string("s", "ABC", &rules).unwrap(), json!("abc"));
        assert!(apply_string("s", "AB1", &rules).is_err());
    }

    #[test]
    fn test_string_values_after_transform() {
        let rules = StringRules::new().to_upper_case().values(["A", "B"]);
        assert_eq!(apply_string("s", "a", &rules).unwrap(), json!("A"));
        assert_eq!(
            apply_string("s", "c", &rules).unwrap_err().message,
            "Property \"s\" has an invalid value of C."
        );
    }

    #[test]
    fn test_transforms_are_idempotent() {
        let rules = StringRules::new().trim().to_upper_case();
        let once = apply_string("s", "  hello ", &rules).unwrap();
        let twice = apply_string("s", once.as_str().unwrap(), &rules).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_date_bounds() {
        let rules = DateRules::new().min("2020-01-01").max("2020-12-31");
        let ok = parse_date("2020-06-01").unwrap();
        assert_eq!(apply_date("d", "2020-06-01", ok, &rules).unwrap(), json!("2020-06-01"));

        let early = parse_date("2019-12-31").unwrap();
        assert_eq!(
            apply_date("d", "2019-12-31", early, &rules).unwrap_err().message,
            "Property \"d\" is before the minimum date of 2020-01-01."
        );

        let late = parse_date("2021-01-01").unwrap();
        assert!(apply_date("d", "2021-01-01", late, &rules).is_err());
    }

    #[test]
    fn test_date_values_exact_string() {
        let rules = DateRules::new().values(["2020-01-01"]);
        let parsed = parse_date("2020-01-01T00:00:00Z").unwrap();
        assert!(apply_date("d", "2020-01-01T00:00:00Z", parsed, &rules).is_err());
    }
}
