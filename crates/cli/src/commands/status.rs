// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `specdoc status`: report each document's version and pending work.

use crate::exit_error::{ExitError, EXIT_FAILED};
use crate::output::{display_path, print_json, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use specdoc_migrate::{Direction, Migrator, SchemaVersion};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Documents to inspect (.json, .yaml, .yml)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Version to compare against (default: latest)
    #[arg(long, value_name = "VERSION")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub file: String,
    /// Version the document is at.
    pub version: SchemaVersion,
    /// False when the document carries no schema_version.
    pub declared: bool,
    pub target: SchemaVersion,
    pub direction: Direction,
    /// Units that a migration to `target` would apply, in order.
    pub pending: Vec<SchemaVersion>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StatusResult {
    Ok(StatusEntry),
    Err { file: String, error: String },
}

/// `spec.json: 1.0 (upgrade to 2.0)`
pub fn format_entry(entry: &StatusEntry) -> String {
    let action = match entry.direction {
        Direction::NoOp => "up to date".to_string(),
        Direction::Upgrade => format!("upgrade to {}", entry.target),
        Direction::Downgrade => format!("downgrade to {}", entry.target),
    };
    format!("{}: {} ({action})", entry.file, entry.version)
}

/// Resolve the plan for one document without running it.
pub fn inspect(
    migrator: &Migrator<'_>,
    path: &Path,
    target: Option<&SchemaVersion>,
) -> Result<StatusEntry> {
    let (_, doc) = super::load(path)?;
    let declared = specdoc_migrate::document::declared_version(&doc)
        .map(|v| v.is_some())
        .unwrap_or(false);
    let plan = migrator.plan(&doc, target)?;
    Ok(StatusEntry {
        file: display_path(path),
        version: plan.from.clone(),
        declared,
        target: plan.to.clone(),
        direction: plan.direction,
        pending: plan.unit_versions().into_iter().cloned().collect(),
    })
}

pub fn handle(args: StatusArgs, migrator: &Migrator<'_>, format: OutputFormat) -> Result<()> {
    let target = super::resolve_target(migrator.registry(), args.to.as_deref())?;

    let mut results = Vec::with_capacity(args.files.len());
    let mut failed = 0usize;
    for path in &args.files {
        match inspect(migrator, path, target.as_ref()) {
            Ok(entry) => {
                if format == OutputFormat::Text {
                    println!("{}", format_entry(&entry));
                }
                results.push(StatusResult::Ok(entry));
            }
            Err(e) => {
                failed += 1;
                let error = crate::format_error(&e);
                tracing::warn!(file = %path.display(), error = %error, "cannot inspect document");
                if format == OutputFormat::Text {
                    eprintln!("error: {}: {error}", path.display());
                }
                results.push(StatusResult::Err {
                    file: display_path(path),
                    error,
                });
            }
        }
    }

    if format == OutputFormat::Json {
        print_json(&results)?;
    }

    if failed > 0 {
        return Err(ExitError::new(
            EXIT_FAILED,
            format!("{failed} of {} documents could not be inspected", args.files.len()),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
