//! Dotted-path access to nested JSON values.
//!
//! Paths are segments joined with `.`. A segment names an object key, or an
//! array index when the value at that point is an array:
//!
//! ```
//! use logbar::{dict_get, dict_set};
//! use serde_json::json;
//!
//! let mut doc = json!({"owner": {"name": "ada"}, "pages": []});
//! dict_set(&mut doc, "pages.1.part", json!("intro")).unwrap();
//!
//! assert_eq!(dict_get(&doc, "owner.name"), Some(&json!("ada")));
//! assert_eq!(doc["pages"], json!([{}, {"part": "intro"}]));
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Separator between path segments.
pub const PATH_SEP: char = '.';

fn segments(path: &str) -> Vec<&str> {
    path.split(PATH_SEP).collect()
}

fn invalid(path: &str, segment: &str) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

fn index(path: &str, segment: &str) -> Result<usize> {
    segment.parse().map_err(|_| invalid(path, segment))
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

// ============================================================================
// Get / Set / Pop
// ============================================================================

/// Look up the value at `path`, or `None` if any segment is missing.
pub fn dict_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path)
        .into_iter()
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Store `new` at `path`, creating what is missing on the way.
///
/// Missing object keys are created as empty objects. Arrays are extended
/// to reach an index: with empty objects on the way down, with nulls at the
/// final segment. A null in the path is replaced by an empty object.
///
/// Fails with [`Error::InvalidPath`] when a segment runs into a scalar or
/// indexes an array with a non-number; `value` may then be partially
/// extended.
pub fn dict_set(value: &mut Value, path: &str, new: Value) -> Result<()> {
    let segments = segments(path);
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = value;
    for segment in parents {
        current = child_or_insert(current, path, segment)?;
    }

    if current.is_null() {
        *current = empty_object();
    }
    match current {
        Value::Object(map) => {
            map.insert((*last).to_string(), new);
        }
        Value::Array(items) => {
            let i = index(path, last)?;
            if i >= items.len() {
                items.resize(i + 1, Value::Null);
            }
            items[i] = new;
        }
        _ => return Err(invalid(path, last)),
    }
    Ok(())
}

fn child_or_insert<'a>(value: &'a mut Value, path: &str, segment: &str) -> Result<&'a mut Value> {
    if value.is_null() {
        *value = empty_object();
    }
    match value {
        Value::Object(map) => Ok(map.entry(segment).or_insert_with(empty_object)),
        Value::Array(items) => {
            let i = index(path, segment)?;
            if i >= items.len() {
                items.resize_with(i + 1, empty_object);
            }
            Ok(&mut items[i])
        }
        _ => Err(invalid(path, segment)),
    }
}

/// Remove `key` from an object and return its value.
///
/// On an array, pops `key` from every element and returns the results as an
/// array, with null where an element lacked the key.
pub fn dict_pop(value: &mut Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(map) => map.remove(key),
        Value::Array(items) => Some(Value::Array(
            items
                .iter_mut()
                .map(|item| dict_pop(item, key).unwrap_or(Value::Null))
                .collect(),
        )),
        _ => None,
    }
}

// ============================================================================
// Extract / Flatten
// ============================================================================

/// Collect the values at `path`, mapping over any arrays on the way.
///
/// `{"pages": [{"part": "a"}, {"part": "b"}]}` with `pages.part` gives
/// `["a", "b"]`. Array elements without the path contribute null.
pub fn dict_extract(value: &Value, path: &str) -> Option<Value> {
    extract(value, &segments(path))
}

fn extract(value: &Value, keys: &[&str]) -> Option<Value> {
    let Some((first, rest)) = keys.split_first() else {
        return Some(value.clone());
    };
    match value {
        Value::Object(map) => extract(map.get(*first)?, rest),
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| extract(item, keys).unwrap_or(Value::Null))
                .collect(),
        )),
        _ => None,
    }
}

/// Like [`dict_extract`], but also removes the leaf keys from `value`.
pub fn dict_extract_pop(value: &mut Value, path: &str) -> Option<Value> {
    let keys = segments(path);
    let extracted = extract(value, &keys)?;
    pop_leaves(value, &keys);
    Some(extracted)
}

fn pop_leaves(value: &mut Value, keys: &[&str]) {
    match keys {
        [] => {}
        [last] => {
            dict_pop(value, last);
        }
        [first, rest @ ..] => match value {
            Value::Object(map) => {
                if let Some(child) = map.get_mut(*first) {
                    pop_leaves(child, rest);
                }
            }
            Value::Array(items) => {
                for item in items {
                    pop_leaves(item, keys);
                }
            }
            _ => {}
        },
    }
}

/// Hoist the leaf at `path` up one level under a joined key, in place.
///
/// `{"owner": {"name": "ada", "id": 1}}` flattened on `owner.name` becomes
/// `{"owner": {"id": 1}, "owner.name": "ada"}`. Arrays along the path are
/// mapped element by element. Paths with fewer than two segments, or that
/// match nothing, leave `value` unchanged.
pub fn dict_flatten(value: &mut Value, path: &str) {
    let keys = segments(path);
    if keys.len() < 2 {
        return;
    }
    let Some(extracted) = dict_extract_pop(value, path) else {
        return;
    };
    let sep = PATH_SEP.to_string();
    let new_key = keys[keys.len() - 2..].join(sep.as_str());
    place(value, extracted, &keys[..keys.len() - 1], &new_key);
}

fn place(value: &mut Value, extracted: Value, level_keys: &[&str], new_key: &str) {
    match value {
        Value::Object(map) => match level_keys {
            [] => {}
            [_] => {
                map.insert(new_key.to_string(), extracted);
            }
            [first, rest @ ..] => {
                if let Some(child) = map.get_mut(*first) {
                    place(child, extracted, rest, new_key);
                }
            }
        },
        Value::Array(items) => {
            if let Value::Array(values) = extracted {
                for (item, item_value) in items.iter_mut().zip(values) {
                    place(item, item_value, level_keys, new_key);
                }
            }
        }
        _ => {}
    }
}
