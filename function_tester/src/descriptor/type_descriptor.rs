//! The [`TypeDescriptor`] sum type and its JSON wire shape.
//!
//! The presentation layer writes descriptors the way a form schema is usually written:
//!
//! ```json
//! { "age": "number", "tags": ["string"], "address": { "city": "string" } }
//! ```
//!
//! A bare kind name is a primitive, a one-element array is a homogeneous list and an object is a
//! keyed record. [`TypeDescriptor::from_json`] turns that shape into the closed enum used by the
//! engine; anything else is a [`TesterError::MalformedDescriptor`].

use crate::error::TesterError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Depth used by the `Deserialize` impl, which has no access to session limits.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveKind::String),
            "number" => Some(PrimitiveKind::Number),
            "boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recursive description of a value's shape.
///
/// The tree owns its children, so a descriptor can never contain itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    /// Every element has the shape of the boxed descriptor.
    List(Box<TypeDescriptor>),
    /// Field name to field shape. Keys iterate in sorted order.
    Record(BTreeMap<String, TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn string() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Boolean)
    }

    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TypeDescriptor)>,
    {
        TypeDescriptor::Record(fields.into_iter().map(|(k, d)| (k.into(), d)).collect())
    }

    /// Parse the JSON wire shape using [`DEFAULT_MAX_DEPTH`].
    pub fn from_json(raw: &Value) -> Result<Self, TesterError> {
        Self::from_json_with_depth(raw, DEFAULT_MAX_DEPTH)
    }

    /// Parse the JSON wire shape, rejecting trees nested deeper than `max_depth` levels.
    pub fn from_json_with_depth(raw: &Value, max_depth: usize) -> Result<Self, TesterError> {
        parse_node(raw, "$", 1, max_depth)
    }

    /// Render back into the JSON wire shape.
    pub fn to_json(&self) -> Value {
        match self {
            TypeDescriptor::Primitive(kind) => Value::String(kind.as_str().to_string()),
            TypeDescriptor::List(element) => Value::Array(vec![element.to_json()]),
            TypeDescriptor::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, d)| (name.clone(), d.to_json()))
                    .collect(),
            ),
        }
    }

    /// Number of descriptor levels, a primitive counting as one.
    pub fn depth(&self) -> usize {
        match self {
            TypeDescriptor::Primitive(_) => 1,
            TypeDescriptor::List(element) => 1 + element.depth(),
            TypeDescriptor::Record(fields) => {
                1 + fields.values().map(TypeDescriptor::depth).max().unwrap_or(0)
            }
        }
    }

    /// The sub-descriptor addressed by `path`, if the path fits this descriptor.
    pub fn resolve(&self, path: &[PathSegment]) -> Option<&TypeDescriptor> {
        let mut current = self;
        for segment in path {
            current = match (current, segment) {
                (TypeDescriptor::List(element), PathSegment::Index(_)) => element.as_ref(),
                (TypeDescriptor::Record(fields), PathSegment::Field(name)) => fields.get(name)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn parse_node(
    raw: &Value,
    at: &str,
    depth: usize,
    max_depth: usize,
) -> Result<TypeDescriptor, TesterError> {
    if depth > max_depth {
        return Err(TesterError::MalformedDescriptor(format!(
            "{at}: nesting exceeds the maximum depth of {max_depth}"
        )));
    }

    match raw {
        Value::String(name) => PrimitiveKind::parse(name)
            .map(TypeDescriptor::Primitive)
            .ok_or_else(|| {
                TesterError::MalformedDescriptor(format!(
                    "{at}: unknown primitive kind '{name}' (expected string, number or boolean)"
                ))
            }),
        Value::Array(items) => match items.as_slice() {
            [element] => Ok(TypeDescriptor::List(Box::new(parse_node(
                element,
                &format!("{at}[]"),
                depth + 1,
                max_depth,
            )?))),
            _ => Err(TesterError::MalformedDescriptor(format!(
                "{at}: a list descriptor needs exactly one element descriptor, found {}",
                items.len()
            ))),
        },
        Value::Object(map) => {
            let mut fields = BTreeMap::new();
            for (name, child) in map {
                let field = parse_node(child, &format!("{at}.{name}"), depth + 1, max_depth)?;
                fields.insert(name.clone(), field);
            }
            Ok(TypeDescriptor::Record(fields))
        }
        other => Err(TesterError::MalformedDescriptor(format!(
            "{at}: expected a kind name, a one-element list or an object, found {other}"
        ))),
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        TypeDescriptor::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

/// One step of a path into a value: a list position or a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Field(name) => write!(f, ".{name}"),
        }
    }
}

/// Render a path as `$.tags[2]` for error messages and logs.
pub fn display_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        out.push_str(&segment.to_string());
    }
    out
}
