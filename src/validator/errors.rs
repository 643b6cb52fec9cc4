//! Validation errors
//!
//! A validation error describes one violated constraint of one property.
//! It is data, returned in [`ValidationOutcome::errors`](super::ValidationOutcome),
//! never raised. Its message is the human-readable string form, e.g.
//! `Property "name" is required.`

use std::fmt::Display;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// One violation, tagged with the top-level property it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Top-level property key (empty for payload-level errors)
    pub property: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Same message, reported against another (outer) property.
    pub(crate) fn reported_as(mut self, property: &str) -> Self {
        self.property = property.to_string();
        self
    }

    pub(crate) fn payload_not_object() -> Self {
        Self::new("", "Request payload must be a JSON object")
    }

    pub(crate) fn required(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" is required.", key))
    }

    pub(crate) fn unknown(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" is not allowed.", key))
    }

    /// `kind` includes its article, e.g. "a number"
    pub(crate) fn wrong_type(key: &str, kind: &str) -> Self {
        Self::new(key, format!("Property \"{}\" must be {}.", key, kind))
    }

    pub(crate) fn date_not_string(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" must be a string containing a date.", key))
    }

    pub(crate) fn invalid_date(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" does not contain a valid date string.", key))
    }

    pub(crate) fn below_min(key: &str, min: impl Display) -> Self {
        Self::new(key, format!("Property \"{}\" is below the minimum value of {}.", key, min))
    }

    pub(crate) fn above_max(key: &str, max: impl Display) -> Self {
        Self::new(key, format!("Property \"{}\" is above the maximum value of {}.", key, max))
    }

    pub(crate) fn before_min_date(key: &str, min: &str) -> Self {
        Self::new(key, format!("Property \"{}\" is before the minimum date of {}.", key, min))
    }

    pub(crate) fn after_max_date(key: &str, max: &str) -> Self {
        Self::new(key, format!("Property \"{}\" is after the maximum date of {}.", key, max))
    }

    pub(crate) fn too_short(key: &str, min: usize) -> Self {
        Self::new(
            key,
            format!("Property \"{}\" is shorter than the minimum length of {}.", key, min),
        )
    }

    pub(crate) fn too_long(key: &str, max: usize) -> Self {
        Self::new(
            key,
            format!("Property \"{}\" is longer than the maximum length of {}.", key, max),
        )
    }

    pub(crate) fn pattern_mismatch(key: &str, pattern: &str) -> Self {
        Self::new(key, format!("Property \"{}\" does not match the pattern {}.", key, pattern))
    }

    pub(crate) fn not_in_values(key: &str, shown: &str) -> Self {
        Self::new(key, format!("Property \"{}\" has an invalid value of {}.", key, shown))
    }

    pub(crate) fn hook_rejected(key: &str, reason: &str) -> Self {
        Self::new(key, format!("Property \"{}\" has an invalid value. {}", key, reason))
    }

    pub(crate) fn not_nested_object(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" must contain a nested object.", key))
    }

    pub(crate) fn not_array(key: &str) -> Self {
        Self::new(key, format!("Property \"{}\" must contain an array.", key))
    }

    pub(crate) fn too_few_items(key: &str, min: usize) -> Self {
        Self::new(key, format!("Property \"{}\" must contain at least {} items.", key, min))
    }

    pub(crate) fn too_many_items(key: &str, max: usize) -> Self {
        Self::new(key, format!("Property \"{}\" must contain at most {} items.", key, max))
    }

    pub(crate) fn invalid_element(key: &str, expected: &str, index: usize) -> Self {
        Self::new(
            key,
            format!(
                "Property \"{}\" must contain only {}; invalid element at index {}.",
                key, expected, index
            ),
        )
    }
}

/// Serialises as the plain message string.
impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "Property \"name\" is required.");
        assert_eq!(err.property, "name");
    }

    #[test]
    fn test_serializes_as_string() {
        let err = ValidationError::above_max("age", 120);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, "Property \"age\" is above the maximum value of 120.");
    }

    #[test]
    fn test_reported_as_keeps_message() {
        let err = ValidationError::required("zip").reported_as("address");
        assert_eq!(err.property, "address");
        assert_eq!(err.message, "Property \"zip\" is required.");
    }
}
