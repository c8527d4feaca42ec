// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod migrate;
pub mod status;
pub mod versions;

use crate::exit_error::{ExitError, EXIT_USAGE};
use crate::output::join_versions;
use anyhow::{Context, Result};
use serde_json::Value;
use specdoc_migrate::{MigrationRegistry, SchemaVersion};
use specdoc_storage::DocumentFile;
use std::path::Path;

/// Parse `--to` and check it against the registry before touching any file.
pub fn resolve_target(
    registry: &MigrationRegistry,
    target: Option<&str>,
) -> Result<Option<SchemaVersion>> {
    let Some(target) = target else {
        return Ok(None);
    };
    let version =
        SchemaVersion::parse(target).map_err(|e| ExitError::new(EXIT_USAGE, e.to_string()))?;
    match registry.resolve(&version) {
        Some(known) => Ok(Some(known.clone())),
        None => {
            let known: Vec<&SchemaVersion> = registry.versions().collect();
            Err(ExitError::new(
                EXIT_USAGE,
                format!(
                    "unknown schema version {target} (known: {})",
                    join_versions(&known)
                ),
            )
            .into())
        }
    }
}

/// Open and parse a document file.
pub fn load(path: &Path) -> Result<(DocumentFile, Value)> {
    let file = DocumentFile::open(path)?;
    let doc = file
        .load()
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((file, doc))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
