//! Immutable structural updates.
//!
//! Each operation walks `path` through both the descriptor and the value, rebuilds every ancestor
//! on the way back up, and copies siblings verbatim. The input value is never touched.
//!
//! ```rust
//! use function_tester::descriptor::{update_at_path, PathSegment, TypeDescriptor};
//! use serde_json::json;
//!
//! let d = TypeDescriptor::from_json(&json!({ "tags": ["string"] })).unwrap();
//! let before = json!({ "tags": ["a", "b"] });
//! let path = [PathSegment::from("tags"), PathSegment::from(1)];
//! let after = update_at_path(&d, &before, &path, json!("z")).unwrap();
//!
//! assert_eq!(after, json!({ "tags": ["a", "z"] }));
//! assert_eq!(before, json!({ "tags": ["a", "b"] }));
//! ```

use super::defaults::synthesize_default;
use super::type_descriptor::{PathSegment, TypeDescriptor, display_path};
use crate::error::TesterError;
use serde_json::{Map, Value};

/// Replace the node at `path` with `leaf`.
///
/// An empty path replaces the whole value.
pub fn update_at_path(
    descriptor: &TypeDescriptor,
    value: &Value,
    path: &[PathSegment],
    leaf: Value,
) -> Result<Value, TesterError> {
    edit_at(descriptor, value, path, path, |_, _| Ok(leaf))
}

/// Remove element `index` from the list at `list_path`.
pub fn remove_at_path(
    descriptor: &TypeDescriptor,
    value: &Value,
    list_path: &[PathSegment],
    index: usize,
) -> Result<Value, TesterError> {
    edit_at(descriptor, value, list_path, list_path, |node, current| {
        if !matches!(node, TypeDescriptor::List(_)) {
            return Err(not_a_list(list_path, node));
        }
        let items = current
            .as_array()
            .ok_or_else(|| invalid(list_path, "expected a list value"))?;
        if index >= items.len() {
            return Err(invalid(
                list_path,
                &format!("index {index} out of range (len {})", items.len()),
            ));
        }
        Ok(Value::Array(
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, item)| item.clone())
                .collect(),
        ))
    })
}

/// Append `seed` (or the element default) to the list at `list_path`.
///
/// A missing list (`null`) is treated as empty.
pub fn append_at_path(
    descriptor: &TypeDescriptor,
    value: &Value,
    list_path: &[PathSegment],
    seed: Option<Value>,
) -> Result<Value, TesterError> {
    edit_at(descriptor, value, list_path, list_path, |node, current| {
        let TypeDescriptor::List(element) = node else {
            return Err(not_a_list(list_path, node));
        };
        let mut items = match current {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            _ => return Err(invalid(list_path, "expected a list value")),
        };
        items.push(seed.unwrap_or_else(|| synthesize_default(element)));
        Ok(Value::Array(items))
    })
}

fn edit_at<E>(
    descriptor: &TypeDescriptor,
    value: &Value,
    path: &[PathSegment],
    full: &[PathSegment],
    edit: E,
) -> Result<Value, TesterError>
where
    E: FnOnce(&TypeDescriptor, &Value) -> Result<Value, TesterError>,
{
    let Some((segment, rest)) = path.split_first() else {
        return edit(descriptor, value);
    };
    let here = &full[..full.len() - path.len()];

    match (descriptor, segment) {
        (TypeDescriptor::List(element), PathSegment::Index(i)) => {
            let items = value
                .as_array()
                .ok_or_else(|| invalid(here, "expected a list value"))?;
            let child = items.get(*i).ok_or_else(|| {
                invalid(
                    here,
                    &format!("index {i} out of range (len {})", items.len()),
                )
            })?;
            let rebuilt = edit_at(element, child, rest, full, edit)?;
            let mut items = items.clone();
            items[*i] = rebuilt;
            Ok(Value::Array(items))
        }
        (TypeDescriptor::Record(fields), PathSegment::Field(name)) => {
            let field = fields
                .get(name)
                .ok_or_else(|| invalid(here, &format!("unknown field '{name}'")))?;
            // Partial values are rebuilt from an empty mapping.
            let mut map = value.as_object().cloned().unwrap_or_else(Map::new);
            let rebuilt = edit_at(field, map.get(name).unwrap_or(&Value::Null), rest, full, edit)?;
            map.insert(name.clone(), rebuilt);
            Ok(Value::Object(map))
        }
        (node, segment) => Err(invalid(
            here,
            &format!("segment '{segment}' does not fit descriptor {node}"),
        )),
    }
}

fn invalid(at: &[PathSegment], reason: &str) -> TesterError {
    TesterError::InvalidPath(format!("{}: {reason}", display_path(at)))
}

fn not_a_list(at: &[PathSegment], node: &TypeDescriptor) -> TesterError {
    invalid(at, &format!("descriptor {node} is not a list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seg(s: &str) -> PathSegment {
        PathSegment::from(s)
    }

    fn form() -> TypeDescriptor {
        TypeDescriptor::from_json(&json!({
            "age": "number",
            "tags": ["string"],
            "friends": [{ "name": "string" }]
        }))
        .unwrap()
    }

    #[test]
    fn replaces_nested_leaf_and_keeps_siblings() {
        let before = json!({
            "age": 3,
            "tags": ["x"],
            "friends": [{ "name": "a" }, { "name": "b" }]
        });
        let path = [seg("friends"), PathSegment::from(1), seg("name")];
        let after = update_at_path(&form(), &before, &path, json!("c")).unwrap();

        assert_eq!(
            after,
            json!({
                "age": 3,
                "tags": ["x"],
                "friends": [{ "name": "a" }, { "name": "c" }]
            })
        );
        assert_eq!(before["friends"][1]["name"], "b");
    }

    #[test]
    fn empty_path_replaces_root() {
        let d = TypeDescriptor::number();
        assert_eq!(update_at_path(&d, &json!(1), &[], json!(2)).unwrap(), json!(2));
    }

    #[test]
    fn partial_record_is_filled_in() {
        let after = update_at_path(&form(), &Value::Null, &[seg("age")], json!(9)).unwrap();
        assert_eq!(after, json!({ "age": 9 }));
    }

    #[test]
    fn out_of_range_index_is_invalid_path() {
        let before = json!({ "age": 1, "tags": ["a"], "friends": [] });
        let err = update_at_path(
            &form(),
            &before,
            &[seg("tags"), PathSegment::from(3)],
            json!("b"),
        )
        .unwrap_err();
        match err {
            TesterError::InvalidPath(msg) => assert!(msg.starts_with("$.tags"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mismatched_segments_are_rejected() {
        let before = json!({ "age": 1, "tags": [], "friends": [] });
        assert!(update_at_path(&form(), &before, &[PathSegment::from(0)], json!(1)).is_err());
        assert!(update_at_path(&form(), &before, &[seg("nope")], json!(1)).is_err());
        assert!(update_at_path(&form(), &before, &[seg("age"), seg("x")], json!(1)).is_err());
    }

    #[test]
    fn remove_drops_only_the_indexed_element() {
        let before = json!({ "age": 1, "tags": ["a", "b", "c"], "friends": [] });
        let after = remove_at_path(&form(), &before, &[seg("tags")], 1).unwrap();
        assert_eq!(after["tags"], json!(["a", "c"]));
        assert_eq!(before["tags"], json!(["a", "b", "c"]));

        assert!(remove_at_path(&form(), &before, &[seg("tags")], 3).is_err());
        assert!(remove_at_path(&form(), &before, &[seg("age")], 0).is_err());
    }

    #[test]
    fn append_uses_element_default_or_seed() {
        let before = json!({ "age": 1, "tags": [], "friends": [] });
        let after = append_at_path(&form(), &before, &[seg("friends")], None).unwrap();
        assert_eq!(after["friends"], json!([{ "name": "" }]));

        let seeded = append_at_path(&form(), &after, &[seg("tags")], Some(json!("t"))).unwrap();
        assert_eq!(seeded["tags"], json!(["t"]));
        assert_eq!(seeded["friends"], json!([{ "name": "" }]));
    }

    #[test]
    fn append_to_missing_list_starts_empty() {
        let after = append_at_path(&form(), &json!({}), &[seg("tags")], None).unwrap();
        assert_eq!(after, json!({ "tags": [""] }));
    }
}
