//! vet - declarative validation and sanitisation of JSON payloads
//!
//! A schema declares, per property, a type and a set of constraints.
//! Validating an input object against it yields a sanitised copy (defaults
//! filled, strings trimmed or case-folded, numbers truncated, undeclared
//! properties dropped) together with every violation found.
//!
//! ```ignore
//! use vet::schema::{Constraint, NumberRules, SchemaDefinition, StringRules};
//! use vet::validator::validate;
//!
//! let schema = SchemaDefinition::new()
//!     .with("name", Constraint::string(StringRules::new().trim()).required())
//!     .with("age", Constraint::number(NumberRules::new().min(0.0)));
//!
//! let outcome = validate(&schema, &serde_json::json!({ "name": " Ada " }));
//! assert!(outcome.is_valid());
//! ```
//!
//! Modules:
//! - `schema`: definitions, JSON parsing, checking and the named registry
//! - `validator`: the pure validation engine
//! - `observability`: structured logging and counters
//! - `cli`: command line entry points
//! - `http_server`: request gate in front of handlers

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod validator;

pub use schema::{Constraint, SchemaDefinition, SchemaError};
pub use validator::{validate, validate_with, ValidateOptions, ValidationError, ValidationOutcome};
