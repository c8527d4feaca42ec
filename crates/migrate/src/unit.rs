// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reversible migration units.

use crate::{Malformed, MigrationError, SchemaVersion};
use serde_json::Value;

/// A reversible transformation that moves a document to [`version`](Migration::version).
///
/// Contract for implementors:
/// - `upgrade` is idempotent in effect: it checks presence before adding and
///   never overwrites or duplicates data that is already there.
/// - Keys outside [`owned_fields`](Migration::owned_fields) pass through
///   untouched in both directions.
/// - `downgrade` restores a shape the previous version's consumers accept.
///   It may drop data `upgrade` introduced, so `downgrade(upgrade(doc))` is
///   not guaranteed to equal `doc`.
/// - No I/O and no process-wide state.
///
/// Units do not write `metadata.schema_version`; the runner stamps it after
/// each successful step.
pub trait Migration: Send + Sync {
    /// The version this unit upgrades a document to.
    fn version(&self) -> &SchemaVersion;

    fn description(&self) -> &str;

    /// Keys this unit may add, change or remove, as path patterns
    /// (`implementation[].progress`).
    fn owned_fields(&self) -> &[&'static str] {
        &[]
    }

    fn upgrade(&self, doc: &mut Value) -> Result<(), Malformed>;

    fn downgrade(&self, doc: &mut Value) -> Result<(), Malformed>;
}

/// Signature of a unit's upgrade or downgrade function.
pub type TransformFn = fn(&mut Value) -> Result<(), Malformed>;

/// A migration unit assembled from a pair of plain functions.
///
/// This is the form used by static migration tables:
///
/// ```
/// use specdoc_migrate::{document, Malformed, MigrationUnit};
/// use serde_json::Value;
///
/// fn add_tags(doc: &mut Value) -> Result<(), Malformed> {
///     let root = document::root_map_mut(doc)?;
///     document::ensure_field(root, "tags", Value::Array(Vec::new()));
///     Ok(())
/// }
///
/// fn drop_tags(doc: &mut Value) -> Result<(), Malformed> {
///     let root = document::root_map_mut(doc)?;
///     document::remove_field(root, "tags");
///     Ok(())
/// }
///
/// let unit = MigrationUnit::new("3.0", "Add tags", add_tags, drop_tags)
///     .unwrap()
///     .owning(&["tags"]);
/// assert_eq!(unit.version().as_str(), "3.0");
/// ```
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    version: SchemaVersion,
    description: &'static str,
    owned_fields: &'static [&'static str],
    upgrade: TransformFn,
    downgrade: TransformFn,
}

impl MigrationUnit {
    pub fn new(
        version: &str,
        description: &'static str,
        upgrade: TransformFn,
        downgrade: TransformFn,
    ) -> Result<Self, MigrationError> {
        Ok(Self {
            version: SchemaVersion::parse(version)?,
            description,
            owned_fields: &[],
            upgrade,
            downgrade,
        })
    }

    /// Declare the keys this unit owns.
    pub fn owning(mut self, fields: &'static [&'static str]) -> Self {
        self.owned_fields = fields;
        self
    }

    pub fn version(&self) -> &SchemaVersion {
        &self.version
    }
}

impl Migration for MigrationUnit {
    fn version(&self) -> &SchemaVersion {
        &self.version
    }

    fn description(&self) -> &str {
        self.description
    }

    fn owned_fields(&self) -> &[&'static str] {
        self.owned_fields
    }

    fn upgrade(&self, doc: &mut Value) -> Result<(), Malformed> {
        (self.upgrade)(doc)
    }

    fn downgrade(&self, doc: &mut Value) -> Result<(), Malformed> {
        (self.downgrade)(doc)
    }
}
