//! Custom validate hook invocation
//!
//! The hook runs last, on the fully processed value, and only when every
//! built-in check passed. A rejection becomes the property's single error.

use serde_json::Value;

use super::errors::ValidationError;
use crate::schema::ValidateHook;

pub fn run_hook(
    key: &str,
    hook: Option<&ValidateHook>,
    value: Value,
) -> Result<Value, ValidationError> {
    match hook {
        None => Ok(value),
        Some(hook) => hook
            .call(value)
            .map_err(|reason| ValidationError::hook_rejected(key, &reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_hook_passes_value_through() {
        assert_eq!(run_hook("k", None, json!(1)).unwrap(), json!(1));
    }

    #[test]
    fn test_hook_can_replace_value() {
        let hook = ValidateHook::new(|v| Ok(json!(v.as_i64().unwrap_or(0) * 2)));
        assert_eq!(run_hook("k", Some(&hook), json!(21)).unwrap(), json!(42));
    }

    #[test]
    fn test_hook_rejection_message() {
        let hook = ValidateHook::new(|_| Err("Must be even.".to_string()));
        let err = run_hook("count", Some(&hook), json!(3)).unwrap_err();
        assert_eq!(err.message, "Property \"count\" has an invalid value. Must be even.");
        assert_eq!(err.property, "count");
    }
}
