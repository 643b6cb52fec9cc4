//! Schema definition errors
//!
//! A schema error is a programmer mistake in a schema definition, detected
//! once at startup. It is never produced by request data and never shown
//! to an HTTP client.
//!
//! Error codes:
//! - VET_SCHEMA_NOT_OBJECT
//! - VET_SCHEMA_MISSING_DECLARATION
//! - VET_SCHEMA_MISSING_TYPE
//! - VET_SCHEMA_UNKNOWN_TYPE
//! - VET_SCHEMA_MISSING_SUBSCHEMA
//! - VET_SCHEMA_TYPE_MISMATCH
//! - VET_SCHEMA_INVALID_RANGE
//! - VET_SCHEMA_INVALID_VALUES
//! - VET_SCHEMA_INVALID_FLAG
//! - VET_SCHEMA_NOT_CALLABLE
//! - VET_SCHEMA_UNSUPPORTED_CONSTRAINT
//! - VET_SCHEMA_INVALID_PATTERN
//! - VET_SCHEMA_MALFORMED
//! - VET_SCHEMA_DUPLICATE

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema is not a non-array object
    NotAnObject,
    /// Property declaration is null
    MissingDeclaration,
    /// Declaration has no `type`
    MissingType,
    /// `type` (or `ofType`) is not a supported tag
    UnknownType,
    /// Object lacks `schema`, or Array lacks `ofType`/`schema`
    MissingSubSchema,
    /// A constraint's value does not match the declared type
    TypeMismatch,
    /// `min > max` or `minLength > maxLength`
    InvalidRange,
    /// `values` is not an array or holds mismatched entries
    InvalidValues,
    /// A boolean flag is not a boolean, or case flags conflict
    InvalidFlag,
    /// `validate` is not callable
    NotCallable,
    /// Constraint key not applicable to the declared type
    UnsupportedConstraint,
    /// `match` does not compile
    InvalidPattern,
    /// Schema source could not be read or parsed
    Malformed,
    /// Schema name already registered
    Duplicate,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::NotAnObject => "VET_SCHEMA_NOT_OBJECT",
            SchemaErrorCode::MissingDeclaration => "VET_SCHEMA_MISSING_DECLARATION",
            SchemaErrorCode::MissingType => "VET_SCHEMA_MISSING_TYPE",
            SchemaErrorCode::UnknownType => "VET_SCHEMA_UNKNOWN_TYPE",
            SchemaErrorCode::MissingSubSchema => "VET_SCHEMA_MISSING_SUBSCHEMA",
            SchemaErrorCode::TypeMismatch => "VET_SCHEMA_TYPE_MISMATCH",
            SchemaErrorCode::InvalidRange => "VET_SCHEMA_INVALID_RANGE",
            SchemaErrorCode::InvalidValues => "VET_SCHEMA_INVALID_VALUES",
            SchemaErrorCode::InvalidFlag => "VET_SCHEMA_INVALID_FLAG",
            SchemaErrorCode::NotCallable => "VET_SCHEMA_NOT_CALLABLE",
            SchemaErrorCode::UnsupportedConstraint => "VET_SCHEMA_UNSUPPORTED_CONSTRAINT",
            SchemaErrorCode::InvalidPattern => "VET_SCHEMA_INVALID_PATTERN",
            SchemaErrorCode::Malformed => "VET_SCHEMA_MALFORMED",
            SchemaErrorCode::Duplicate => "VET_SCHEMA_DUPLICATE",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the offending property.
///
/// `key` is always the top-level property, even when the defect sits in a
/// nested schema; `path` holds the nested keys below it.
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    key: Option<String>,
    path: Vec<String>,
    message: String,
}

impl SchemaError {
    /// Create an error for a property
    pub fn new(code: SchemaErrorCode, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            key: Some(key.into()),
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// The schema itself is not an object
    pub fn not_an_object(actual: &str) -> Self {
        Self {
            code: SchemaErrorCode::NotAnObject,
            key: None,
            path: Vec::new(),
            message: format!("Schema definition must be an object, got {}", actual),
        }
    }

    /// Schema source could not be read or decoded
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Malformed,
            key: None,
            path: Vec::new(),
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
        }
    }

    /// Schema name registered twice
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Duplicate,
            key: None,
            path: Vec::new(),
            message: format!("Schema '{}' is already registered", name.into()),
        }
    }

    /// Re-tags an error raised inside the nested schema of `outer`.
    pub fn nested_in(mut self, outer: &str) -> Self {
        if let Some(inner) = self.key.take() {
            self.path.insert(0, inner);
        }
        self.key = Some(outer.to_string());
        self
    }

    /// Prefixes the message with the schema source (e.g. a file name).
    pub fn in_source(mut self, source: &str) -> Self {
        self.message = format!("{}: {}", source, self.message);
        self
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Top-level property the error belongs to
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Nested keys below [`key`](Self::key), outermost first
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Schema errors always block startup
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: ", self.code)?;
        if let Some(key) = &self.key {
            write!(f, "property \"{}\"", key)?;
            for inner in &self.path {
                write!(f, " > \"{}\"", inner)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
