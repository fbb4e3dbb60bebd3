//! Default value synthesis.

use super::type_descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::TesterError;
use serde_json::{Map, Value};

/// Build the "empty" value for a descriptor.
///
/// Strings become `""`, numbers `0`, booleans `false`, lists `[]`, and records get every field
/// filled with its own default.
pub fn synthesize_default(descriptor: &TypeDescriptor) -> Value {
    match descriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String) => Value::String(String::new()),
        TypeDescriptor::Primitive(PrimitiveKind::Number) => Value::from(0),
        TypeDescriptor::Primitive(PrimitiveKind::Boolean) => Value::Bool(false),
        TypeDescriptor::List(_) => Value::Array(Vec::new()),
        TypeDescriptor::Record(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), synthesize_default(field)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Parse a raw JSON descriptor and synthesize its default.
///
/// # Errors
/// Returns [`TesterError::MalformedDescriptor`] when `raw` is not a recognised descriptor shape.
pub fn synthesize_default_raw(raw: &Value) -> Result<Value, TesterError> {
    let descriptor = TypeDescriptor::from_json(raw)?;
    Ok(synthesize_default(&descriptor))
}
