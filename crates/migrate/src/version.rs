// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dotted-numeric schema versions and migration direction.
//!
//! Versions are compared component-wise as integers, with trailing zero
//! components ignored: `"2" == "2.0"`, `"2.0" < "2.1" < "2.10"`. The
//! spelling a version was parsed from is kept for display and stamping.

use crate::MigrationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed schema version such as `"1.0"` or `"2.1.3"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    raw: String,
    /// Numeric components with trailing zeros trimmed (never empty).
    key: Vec<u64>,
}

impl SchemaVersion {
    /// Parse a version string, rejecting anything outside `DIGITS('.'DIGITS)*`.
    pub fn parse(input: &str) -> Result<Self, MigrationError> {
        let invalid = |reason: &str| MigrationError::InvalidVersionFormat {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("version is empty"));
        }

        let mut key = Vec::new();
        for component in input.split('.') {
            if component.is_empty() {
                return Err(invalid("empty version component"));
            }
            if !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("version components must be decimal digits"));
            }
            let n = component
                .parse::<u64>()
                .map_err(|_| invalid("version component is too large"))?;
            key.push(n);
        }

        while key.len() > 1 && key.last() == Some(&0) {
            key.pop();
        }

        Ok(Self {
            raw: input.to_string(),
            key,
        })
    }

    /// The spelling this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric components, trailing zeros trimmed.
    pub fn components(&self) -> &[u64] {
        &self.key
    }
}

impl FromStr for SchemaVersion {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = MigrationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SchemaVersion> for String {
    fn from(v: SchemaVersion) -> Self {
        v.raw
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for SchemaVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SchemaVersion {}

impl Hash for SchemaVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic over trimmed components: "2" < "2.1".
        self.key.cmp(&other.key)
    }
}

/// Which way a document moves between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Upgrade,
    Downgrade,
    NoOp,
}

impl Direction {
    /// Direction of travel from `from` to `to`.
    pub fn between(from: &SchemaVersion, to: &SchemaVersion) -> Self {
        match from.cmp(to) {
            Ordering::Less => Self::Upgrade,
            Ordering::Greater => Self::Downgrade,
            Ordering::Equal => Self::NoOp,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade => write!(f, "upgrade"),
            Self::Downgrade => write!(f, "downgrade"),
            Self::NoOp => write!(f, "no-op"),
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
