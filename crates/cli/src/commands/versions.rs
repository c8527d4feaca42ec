// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `specdoc versions`

use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use specdoc_migrate::{MigrationRegistry, SchemaVersion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    pub version: SchemaVersion,
    pub description: Option<String>,
    pub baseline: bool,
    pub latest: bool,
}

pub fn entries(registry: &MigrationRegistry) -> Vec<VersionEntry> {
    registry
        .versions()
        .map(|version| VersionEntry {
            version: version.clone(),
            description: registry.get(version).map(|u| u.description().to_string()),
            baseline: version == registry.baseline(),
            latest: version == registry.latest_version(),
        })
        .collect()
}

/// `2.0 (latest): Track progress ...`
pub fn format_entry(entry: &VersionEntry) -> String {
    let mut line = entry.version.to_string();
    let markers: Vec<&str> = [(entry.baseline, "baseline"), (entry.latest, "latest")]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();
    if !markers.is_empty() {
        line.push_str(&format!(" ({})", markers.join(", ")));
    }
    if let Some(description) = &entry.description {
        line.push_str(&format!(": {description}"));
    }
    line
}

pub fn handle(registry: &MigrationRegistry, format: OutputFormat) -> Result<()> {
    let entries = entries(registry);
    match format {
        OutputFormat::Text => {
            for entry in &entries {
                println!("{}", format_entry(entry));
            }
        }
        OutputFormat::Json => print_json(&entries)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "versions_tests.rs"]
mod tests;
