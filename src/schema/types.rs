//! Schema type definitions
//!
//! A schema is an ordered mapping from property name to a [`Constraint`].
//! The constraint's [`ConstraintKind`] is a closed set of six tags:
//! - Boolean
//! - Number: min, max, trunc, values
//! - String: minLength, maxLength, match, trim, toUpperCase, toLowerCase, values
//! - Date: ISO-8601 string with min, max, values
//! - Object: nested schema
//! - Array: element type plus minLength, maxLength
//!
//! Every kind additionally carries `required`, `default` and an optional
//! custom [`ValidateHook`].

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

/// Scalar types usable directly or as array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Boolean,
    Number,
    String,
    /// A string holding a parsable calendar date
    Date,
}

impl PrimitiveType {
    /// Returns the type tag used in schema definitions
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Number => "Number",
            PrimitiveType::String => "String",
            PrimitiveType::Date => "Date",
        }
    }

    /// Parses a type tag; `Object` and `Array` are not primitives.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Boolean" => Some(PrimitiveType::Boolean),
            "Number" => Some(PrimitiveType::Number),
            "String" => Some(PrimitiveType::String),
            "Date" => Some(PrimitiveType::Date),
            _ => None,
        }
    }

    /// Plural noun used in array element messages
    pub(crate) fn plural(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "booleans",
            PrimitiveType::Number => "numbers",
            PrimitiveType::String => "strings",
            PrimitiveType::Date => "dates",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// User-supplied per-property check, run after every built-in constraint.
///
/// Receives the fully processed value and returns either a (possibly
/// replaced) value or a message describing why the value is rejected.
#[derive(Clone)]
pub struct ValidateHook(Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>);

impl ValidateHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub fn call(&self, value: Value) -> Result<Value, String> {
        (self.0)(value)
    }
}

impl fmt::Debug for ValidateHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidateHook(..)")
    }
}

/// Number constraints
#[derive(Debug, Clone, Default)]
pub struct NumberRules {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Truncate toward zero before any other check
    pub trunc: bool,
    /// Allowed values
    pub values: Option<Vec<f64>>,
}

impl NumberRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn trunc(mut self) -> Self {
        self.trunc = true;
        self
    }

    pub fn values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.values = Some(values.into_iter().collect());
        self
    }
}

/// String constraints
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    /// Inclusive minimum character count
    pub min_length: Option<usize>,
    /// Inclusive maximum character count
    pub max_length: Option<usize>,
    /// Pattern the transformed value must match
    pub pattern: Option<Regex>,
    pub trim: bool,
    pub to_upper_case: bool,
    pub to_lower_case: bool,
    /// Allowed values
    pub values: Option<Vec<String>>,
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn to_upper_case(mut self) -> Self {
        self.to_upper_case = true;
        self
    }

    pub fn to_lower_case(mut self) -> Self {
        self.to_lower_case = true;
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Date constraints. Bounds and allowed values are date strings.
#[derive(Debug, Clone, Default)]
pub struct DateRules {
    pub min: Option<String>,
    pub max: Option<String>,
    pub values: Option<Vec<String>>,
}

impl DateRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Element type of an array property.
#[derive(Debug, Clone)]
pub enum ElementType {
    Primitive(PrimitiveType),
    /// Nested documents validated against their own schema
    Object(SchemaDefinition),
}

impl ElementType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementType::Primitive(p) => p.type_name(),
            ElementType::Object(_) => "Object",
        }
    }
}

impl From<PrimitiveType> for ElementType {
    fn from(primitive: PrimitiveType) -> Self {
        ElementType::Primitive(primitive)
    }
}

/// Array constraints
#[derive(Debug, Clone)]
pub struct ArrayRules {
    pub of_type: ElementType,
    /// Inclusive minimum element count
    pub min_length: Option<usize>,
    /// Inclusive maximum element count
    pub max_length: Option<usize>,
}

impl ArrayRules {
    pub fn new(of_type: ElementType) -> Self {
        Self {
            of_type,
            min_length: None,
            max_length: None,
        }
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }
}

/// Type tag plus the constraint payload that belongs to it.
#[derive(Debug, Clone)]
pub enum ConstraintKind {
    Boolean,
    Number(NumberRules),
    String(StringRules),
    Date(DateRules),
    Object(SchemaDefinition),
    Array(ArrayRules),
}

impl ConstraintKind {
    /// Returns the type tag for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstraintKind::Boolean => "Boolean",
            ConstraintKind::Number(_) => "Number",
            ConstraintKind::String(_) => "String",
            ConstraintKind::Date(_) => "Date",
            ConstraintKind::Object(_) => "Object",
            ConstraintKind::Array(_) => "Array",
        }
    }
}

/// One property's declaration.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    /// Whether a missing (or null) value is an error
    pub required: bool,
    /// Value used when the property is absent. `Some(Value::Null)` declares
    /// an explicit null default.
    pub default: Option<Value>,
    pub validate: Option<ValidateHook>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            validate: None,
        }
    }

    pub fn boolean() -> Self {
        Self::new(ConstraintKind::Boolean)
    }

    pub fn number(rules: NumberRules) -> Self {
        Self::new(ConstraintKind::Number(rules))
    }

    pub fn string(rules: StringRules) -> Self {
        Self::new(ConstraintKind::String(rules))
    }

    pub fn date(rules: DateRules) -> Self {
        Self::new(ConstraintKind::Date(rules))
    }

    pub fn object(schema: SchemaDefinition) -> Self {
        Self::new(ConstraintKind::Object(schema))
    }

    pub fn array(rules: ArrayRules) -> Self {
        Self::new(ConstraintKind::Array(rules))
    }

    /// Array of primitive values without length constraints
    pub fn array_of(element: PrimitiveType) -> Self {
        Self::array(ArrayRules::new(ElementType::Primitive(element)))
    }

    /// Array of nested documents without length constraints
    pub fn array_of_objects(schema: SchemaDefinition) -> Self {
        Self::array(ArrayRules::new(ElementType::Object(schema)))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.validate = Some(ValidateHook::new(hook));
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// Ordered mapping from property name to constraint.
///
/// Declaration order is validation order, which is also the order of
/// keys in the validated output and of reported errors.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    properties: Vec<(String, Constraint)>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property, builder style.
    pub fn with(mut self, key: impl Into<String>, constraint: Constraint) -> Self {
        self.insert(key, constraint);
        self
    }

    /// Adds a property. Redeclaring a key replaces it in place.
    pub fn insert(&mut self, key: impl Into<String>, constraint: Constraint) {
        let key = key.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = constraint,
            None => self.properties.push((key, constraint)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Constraint> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constraint)> {
        self.properties.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Constraint)> for SchemaDefinition {
    fn from_iter<T: IntoIterator<Item = (K, Constraint)>>(iter: T) -> Self {
        let mut schema = SchemaDefinition::new();
        for (key, constraint) in iter {
            schema.insert(key, constraint);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = SchemaDefinition::new()
            .with("zeta", Constraint::boolean())
            .with("alpha", Constraint::number(NumberRules::new()))
            .with("mid", Constraint::string(StringRules::new()));

        let keys: Vec<_> = schema.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclared_key_replaced_in_place() {
        let schema = SchemaDefinition::new()
            .with("a", Constraint::boolean())
            .with("b", Constraint::boolean())
            .with("a", Constraint::string(StringRules::new()));

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.keys().next(), Some("a"));
        assert_eq!(schema.get("a").unwrap().type_name(), "String");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Constraint::boolean().type_name(), "Boolean");
        assert_eq!(Constraint::number(NumberRules::new()).type_name(), "Number");
        assert_eq!(Constraint::date(DateRules::new()).type_name(), "Date");
        assert_eq!(Constraint::object(SchemaDefinition::new()).type_name(), "Object");
        assert_eq!(Constraint::array_of(PrimitiveType::String).type_name(), "Array");
        assert_eq!(
            ElementType::Object(SchemaDefinition::new()).type_name(),
            "Object"
        );
    }

    #[test]
    fn test_primitive_from_name() {
        assert_eq!(PrimitiveType::from_name("Date"), Some(PrimitiveType::Date));
        assert_eq!(PrimitiveType::from_name("Object"), None);
        assert_eq!(PrimitiveType::from_name("string"), None);
    }

    #[test]
    fn test_hook_is_callable() {
        let c = Constraint::string(StringRules::new())
            .with_hook(|v| Ok(json!(format!("{}!", v.as_str().unwrap_or("")))));
        let out = c.validate.unwrap().call(json!("hi")).unwrap();
        assert_eq!(out, json!("hi!"));
    }
}
