// cas-common/src/process.rs
//! Pure transformations applied to API JSON before it becomes a typed record.
//!
//! The API sends empty strings and lists of empty values for data it does not
//! have, and uses camelCase keys. Records are built by stripping the empty
//! fields, renaming keys through each record's alias table and only then
//! deserializing, so that optional fields come out as `None`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CasError, Result};
use crate::model::{AliasTable, Chemical, CoreChemical, SearchResults, WireRecord};

/// Mirrors the usual truthiness rules for JSON values.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Drops falsy values and lists whose elements are all falsy.
pub fn strip_empty(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(key, value)| {
            let keep = match value {
                Value::Array(items) => items.iter().any(|item| !is_falsy(item)),
                other => !is_falsy(other),
            };
            if !keep {
                debug!("Dropping empty field '{}'", key);
            }
            keep
        })
        .collect()
}

/// Replaces an `images` list with its first element under `image`.
pub fn promote_image(mut map: Map<String, Value>) -> Map<String, Value> {
    if let Some(images) = map.remove("images") {
        if let Some(first) = first_truthy_image(images) {
            map.insert("image".to_string(), first);
        }
    }
    map
}

fn first_truthy_image(images: Value) -> Option<Value> {
    let first = match images {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    };
    first.filter(|image| !is_falsy(image))
}

/// Renames wire keys to field names. Keys missing from the table pass through.
pub fn rename_keys(map: Map<String, Value>, aliases: AliasTable) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let renamed = aliases
                .iter()
                .find(|(wire, _)| *wire == key)
                .map(|(_, field)| (*field).to_string())
                .unwrap_or(key);
            (renamed, value)
        })
        .collect()
}

/// Renames keys of `map` and of the objects inside its nested list fields.
pub fn apply_aliases<T: WireRecord>(map: Map<String, Value>) -> Map<String, Value> {
    let mut map = rename_keys(map, T::ALIASES);
    for (field, element_aliases) in T::NESTED {
        if let Some(Value::Array(items)) = map.get_mut(*field) {
            for item in items.iter_mut() {
                if let Value::Object(obj) = item {
                    *obj = rename_keys(std::mem::take(obj), *element_aliases);
                }
            }
        }
    }
    map
}

/// Renames and deserializes a record; shape errors become [`CasError::Validation`].
pub fn from_wire<T: WireRecord>(map: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(apply_aliases::<T>(map)))
        .map_err(|e| CasError::Validation(format!("{}: {}", T::NAME, e)))
}

fn expect_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CasError::Validation(format!(
            "{what}: expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds a [`Chemical`] from a detail response body.
pub fn chemical_from_value(value: Value) -> Result<Chemical> {
    let map = expect_object(value, Chemical::NAME)?;
    from_wire(strip_empty(map))
}

/// Builds [`SearchResults`] from a search response body.
pub fn search_results_from_value(value: Value) -> Result<SearchResults> {
    let mut map = expect_object(value, SearchResults::NAME)?;
    if let Some(Value::Array(results)) = map.get_mut("results") {
        for item in results.iter_mut() {
            if let Value::Object(obj) = item {
                *obj = promote_image(std::mem::take(obj));
            }
        }
    }
    from_wire(map)
}

/// Builds one search hit. Exposed for callers holding a single result item.
pub fn core_chemical_from_value(value: Value) -> Result<CoreChemical> {
    let map = expect_object(value, CoreChemical::NAME)?;
    from_wire(promote_image(map))
}
