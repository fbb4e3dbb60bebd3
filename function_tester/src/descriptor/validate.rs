//! Structural validation of values against descriptors.
//!
//! Validation never fails loudly: a value that does not conform, or a missing sub-value, simply
//! yields `false`. Primitive kinds are matched exactly, with no coercion (`"30"` is not a number).
//! Records are open, so fields absent from the descriptor are ignored.

use super::type_descriptor::{PrimitiveKind, TypeDescriptor};
use serde_json::Value;

pub fn validate(descriptor: &TypeDescriptor, value: &Value) -> bool {
    match (descriptor, value) {
        (TypeDescriptor::Primitive(PrimitiveKind::String), Value::String(_)) => true,
        (TypeDescriptor::Primitive(PrimitiveKind::Number), Value::Number(_)) => true,
        (TypeDescriptor::Primitive(PrimitiveKind::Boolean), Value::Bool(_)) => true,
        (TypeDescriptor::List(element), Value::Array(items)) => {
            items.iter().all(|item| validate(element, item))
        }
        (TypeDescriptor::Record(fields), Value::Object(map)) => fields
            .iter()
            .all(|(name, field)| map.get(name).is_some_and(|v| validate(field, v))),
        _ => false,
    }
}

/// Validate against a raw JSON descriptor. A malformed descriptor validates nothing.
pub fn validate_raw(raw: &Value, value: &Value) -> bool {
    match TypeDescriptor::from_json(raw) {
        Ok(descriptor) => validate(&descriptor, value),
        Err(e) => {
            tracing::debug!(error = %e, "validating against a malformed descriptor");
            false
        }
    }
}
