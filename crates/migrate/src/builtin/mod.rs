// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in migrations for specification documents.
//!
//! Adding a schema version means adding a module here and one entry to
//! [`units`]. The process-wide registry is built from that list on first
//! use and never changes afterwards.

pub mod work_tracking;

use crate::{Migration, MigrationError, MigrationRegistry, SchemaVersion};
use std::sync::OnceLock;

/// The oldest document schema: documents without a version are at 1.0.
pub const BASELINE_VERSION: &str = "1.0";

/// Every built-in unit, in any order.
pub fn units() -> Result<Vec<Box<dyn Migration>>, MigrationError> {
    Ok(vec![Box::new(work_tracking::unit()?)])
}

/// Build a fresh registry holding the built-in table.
pub fn build_registry() -> Result<MigrationRegistry, MigrationError> {
    let mut registry = MigrationRegistry::new(SchemaVersion::parse(BASELINE_VERSION)?);
    for unit in units()? {
        registry.register(unit)?;
    }
    Ok(registry)
}

/// The process-wide built-in registry, initialised on first call.
///
/// A registration failure is cached and returned to every caller.
pub fn registry() -> Result<&'static MigrationRegistry, MigrationError> {
    static REGISTRY: OnceLock<Result<MigrationRegistry, MigrationError>> = OnceLock::new();
    REGISTRY
        .get_or_init(build_registry)
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
