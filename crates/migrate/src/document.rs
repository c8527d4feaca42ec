// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence-checked accessors over untyped documents.
//!
//! Migrations never index a [`Value`] blindly: every access goes through
//! these helpers, which report the offending path as [`Malformed`] when a
//! document has an unexpected shape. Presence means "key exists", never
//! "value is truthy", so explicit `false`, `0` and `null` survive.

use crate::SchemaVersion;
use serde_json::{Map, Value};
use thiserror::Error;

/// Top-level key holding document metadata.
pub const METADATA: &str = "metadata";

/// Key inside [`METADATA`] holding the declared schema version.
pub const SCHEMA_VERSION: &str = "schema_version";

/// Path label used for the document root.
pub const ROOT: &str = "(root)";

/// A document shape a migration cannot transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{path}`: {reason}")]
pub struct Malformed {
    pub path: String,
    pub reason: String,
}

impl Malformed {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shape mismatch: `path` should have been `expected` but was `found`.
    pub fn expected(path: impl Into<String>, expected: &str, found: &Value) -> Self {
        Self::new(path, format!("expected {expected}, found {}", kind_of(found)))
    }
}

/// Human label for the shape of a value, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

/// The document root as a map.
pub fn root_map_mut(doc: &mut Value) -> Result<&mut Map<String, Value>, Malformed> {
    match doc {
        Value::Object(map) => Ok(map),
        other => Err(Malformed::expected(ROOT, "a map", other)),
    }
}

/// The raw `metadata.schema_version` value, if the document declares one.
///
/// A missing `metadata` map, a missing key and an explicit `null` all count
/// as undeclared. The caller decides what a non-string value means.
pub fn declared_version(doc: &Value) -> Result<Option<&Value>, Malformed> {
    let root = match doc {
        Value::Object(map) => map,
        other => return Err(Malformed::expected(ROOT, "a map", other)),
    };
    let metadata = match root.get(METADATA) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(Malformed::expected(METADATA, "a map", other)),
    };
    match metadata.get(SCHEMA_VERSION) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(value)),
    }
}

/// Write `metadata.schema_version`, creating `metadata` when absent.
pub fn stamp_version(doc: &mut Value, version: &SchemaVersion) -> Result<(), Malformed> {
    let root = root_map_mut(doc)?;
    let metadata = root
        .entry(METADATA)
        .or_insert_with(|| Value::Object(Map::new()));
    if metadata.is_null() {
        *metadata = Value::Object(Map::new());
    }
    match metadata {
        Value::Object(map) => {
            map.insert(
                SCHEMA_VERSION.to_string(),
                Value::String(version.as_str().to_string()),
            );
            Ok(())
        }
        other => Err(Malformed::expected(METADATA, "a map", other)),
    }
}

/// The sequence stored under `key`, if any.
///
/// Absent and `null` yield `None`; any shape other than a sequence is
/// malformed.
pub fn sequence_mut<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<Option<&'a mut Vec<Value>>, Malformed> {
    match map.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(Malformed::expected(key, "a sequence", other)),
    }
}

/// Every element of `items` as a map, checked before anything is handed out.
///
/// `path` names the sequence; errors report `path[index]`.
pub fn maps_mut<'a>(
    items: &'a mut [Value],
    path: &str,
) -> Result<Vec<&'a mut Map<String, Value>>, Malformed> {
    if let Some((index, bad)) = items.iter().enumerate().find(|(_, v)| !v.is_object()) {
        return Err(Malformed::expected(format!("{path}[{index}]"), "a map", bad));
    }
    Ok(items.iter_mut().filter_map(Value::as_object_mut).collect())
}

/// Insert `default` under `key` unless the key already exists.
///
/// Returns `true` when the field was added.
pub fn ensure_field(map: &mut Map<String, Value>, key: &str, default: Value) -> bool {
    if map.contains_key(key) {
        return false;
    }
    map.insert(key.to_string(), default);
    true
}

/// Remove `key`, keeping the order of the remaining keys.
pub fn remove_field(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.shift_remove(key)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
