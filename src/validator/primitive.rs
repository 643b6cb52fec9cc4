//! Primitive type checks
//!
//! Exact-type checks with no coercion: `"1"` is not a number and `"true"`
//! is not a boolean. A Date is a string that parses to a calendar date;
//! the original string is what gets stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::errors::ValidationError;
use crate::schema::PrimitiveType;

/// Date-time layouts accepted besides RFC 3339 / RFC 2822.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn check_boolean(key: &str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::wrong_type(key, "a boolean"))
}

pub fn check_number(key: &str, value: &Value) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .ok_or_else(|| ValidationError::wrong_type(key, "a number"))
}

pub fn check_string<'a>(key: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::wrong_type(key, "a string"))
}

/// Returns the original string together with its parsed instant.
pub fn check_date<'a>(
    key: &str,
    value: &'a Value,
) -> Result<(&'a str, DateTime<Utc>), ValidationError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ValidationError::date_not_string(key))?;
    let parsed = parse_date(raw).ok_or_else(|| ValidationError::invalid_date(key))?;
    Ok((raw, parsed))
}

/// Type check only, used for array elements.
pub fn matches_primitive(kind: PrimitiveType, value: &Value) -> bool {
    match kind {
        PrimitiveType::Boolean => value.is_boolean(),
        PrimitiveType::Number => value.is_number(),
        PrimitiveType::String => value.is_string(),
        PrimitiveType::Date => value.as_str().and_then(parse_date).is_some(),
    }
}

/// Parses a date string into a UTC instant.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD` and ISO-8601 date-times without
/// offset (read as UTC). Impossible calendar dates such as `2023-02-30`
/// are rejected.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_coercion() {
        assert!(check_boolean("b", &json!(true)).is_ok());
        assert!(check_boolean("b", &json!("true")).is_err());
        assert!(check_boolean("b", &json!(1)).is_err());

        assert_eq!(check_number("n", &json!(2.5)).unwrap(), 2.5);
        assert!(check_number("n", &json!("2.5")).is_err());

        assert_eq!(check_string("s", &json!("x")).unwrap(), "x");
        assert!(check_string("s", &json!(1)).is_err());
    }

    #[test]
    fn test_type_messages() {
        assert_eq!(
            check_number("age", &json!("1")).unwrap_err().message,
            "Property \"age\" must be a number."
        );
        assert_eq!(
            check_boolean("ok", &json!(null)).unwrap_err().message,
            "Property \"ok\" must be a boolean."
        );
    }

    #[test]
    fn test_date_messages_differ() {
        assert_eq!(
            check_date("at", &json!(20200101)).unwrap_err().message,
            "Property \"at\" must be a string containing a date."
        );
        assert_eq!(
            check_date("at", &json!("someday")).unwrap_err().message,
            "Property \"at\" does not contain a valid date string."
        );
    }

    #[test]
    fn test_date_keeps_original_string() {
        let value = json!("2024-03-01T10:00:00Z");
        let (raw, _) = check_date("at", &value).unwrap();
        assert_eq!(raw, "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-03-01").is_some());
        assert!(parse_date("2024-03-01T10:00:00").is_some());
        assert!(parse_date("2024-03-01T10:00:00.250Z").is_some());
        assert!(parse_date("2024-03-01T10:00:00+02:00").is_some());
        assert!(parse_date("Fri, 01 Mar 2024 10:00:00 +0000").is_some());
        assert!(parse_date("2023-02-30").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("tomorrow").is_none());
    }

    #[test]
    fn test_parse_date_ordering() {
        let early = parse_date("2024-01-01").unwrap();
        let late = parse_date("2024-01-01T00:00:01Z").unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_matches_primitive() {
        assert!(matches_primitive(PrimitiveType::Number, &json!(1)));
        assert!(!matches_primitive(PrimitiveType::Number, &json!("1")));
        assert!(matches_primitive(PrimitiveType::Date, &json!("2024-01-01")));
        assert!(!matches_primitive(PrimitiveType::Date, &json!("nope")));
        assert!(!matches_primitive(PrimitiveType::String, &json!(null)));
    }
}
