//! Schema definitions for vet
//!
//! A schema is declared once, checked once (at startup), and then shared
//! read-only by every validation call.
//!
//! # Design Principles
//!
//! - Closed set of six type tags, payload determined by the tag
//! - Malformed definitions are programmer errors: they fail fast with a
//!   [`SchemaError`] and never reach request handling
//! - Errors in nested schemas are reported against the top-level key
//! - Checking is deterministic and never mutates the schema

mod checker;
mod errors;
mod loader;
mod parser;
mod types;

pub use checker::check_schema_definition;
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use parser::parse_schema_definition;
pub use types::{
    ArrayRules, Constraint, ConstraintKind, DateRules, ElementType, NumberRules, PrimitiveType,
    SchemaDefinition, StringRules, ValidateHook,
};
