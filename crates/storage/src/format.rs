// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk document formats

use crate::StoreError;
use serde_json::Value;
use serde_yaml::Value as Yaml;
use std::fmt;
use std::path::Path;

/// Serialization format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Parse document text. Map key order is kept as written.
    ///
    /// YAML that has no exact JSON counterpart (non-finite floats, non-string
    /// keys, tags) is rejected rather than coerced.
    pub fn parse(self, text: &str) -> Result<Value, StoreError> {
        Ok(match self {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => {
                let yaml: Yaml = serde_yaml::from_str(text)?;
                check_yaml(&yaml, ROOT)?;
                serde_json::to_value(&yaml)?
            }
        })
    }

    /// Render a document. JSON is pretty-printed with a trailing newline.
    pub fn render(self, doc: &Value) -> Result<String, StoreError> {
        match self {
            Format::Json => {
                let mut text = serde_json::to_string_pretty(doc)?;
                text.push('\n');
                Ok(text)
            }
            Format::Yaml => Ok(serde_yaml::to_string(doc)?),
        }
    }
}

const ROOT: &str = "(root)";

fn child(path: &str, key: &str) -> String {
    if path == ROOT {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn yaml_kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a map",
        Yaml::Tagged(_) => "a tagged value",
    }
}

/// Walk a YAML tree and fail on the first value JSON cannot hold as written.
fn check_yaml(value: &Yaml, path: &str) -> Result<(), StoreError> {
    let unrepresentable = |reason: String| StoreError::Unrepresentable {
        path: path.to_string(),
        reason,
    };
    match value {
        Yaml::Null | Yaml::Bool(_) | Yaml::String(_) => Ok(()),
        Yaml::Number(n) if n.is_finite() => Ok(()),
        Yaml::Number(n) => Err(unrepresentable(format!("non-finite number {n}"))),
        Yaml::Tagged(tagged) => Err(unrepresentable(format!("tagged value {}", tagged.tag))),
        Yaml::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_yaml(item, &format!("{path}[{i}]"))),
        Yaml::Mapping(map) => map.iter().try_for_each(|(key, item)| match key {
            Yaml::String(k) => check_yaml(item, &child(path, k)),
            other => Err(unrepresentable(format!(
                "map key is {}, not a string",
                yaml_kind(other)
            ))),
        }),
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
