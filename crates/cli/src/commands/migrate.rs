// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `specdoc migrate`: move documents to a schema version and write them back.
//!
//! Each document is handled on its own. A document whose migration fails is
//! reported and left untouched on disk; the remaining documents still run.

use crate::exit_error::{ExitError, EXIT_FAILED};
use crate::output::{display_path, join_versions, print_json, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use specdoc_migrate::{FailedStep, Manifest, Migrator, SchemaVersion};
use specdoc_storage::DocumentFile;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Documents to migrate (.json, .yaml, .yml)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Target schema version (default: latest)
    #[arg(long, value_name = "VERSION")]
    pub to: Option<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not keep a .bak copy of overwritten documents
    #[arg(long)]
    pub no_backup: bool,
}

/// How documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub dry_run: bool,
    pub backup: bool,
}

/// Result of migrating one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Migrated {
        file: String,
        manifest: Manifest,
        /// False for a dry run.
        written: bool,
        backup: Option<PathBuf>,
    },
    Current {
        file: String,
        version: SchemaVersion,
    },
    Failed {
        file: String,
        error: String,
        /// Units that succeeded before the failure. Their result is not written.
        applied: Vec<SchemaVersion>,
        failed_at: Option<FailedStep>,
    },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    fn failed(path: &Path, err: &anyhow::Error) -> Self {
        Outcome::Failed {
            file: display_path(path),
            error: crate::format_error(err),
            applied: Vec::new(),
            failed_at: None,
        }
    }
}

/// Text rendering of an outcome; failures are meant for stderr.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Migrated {
            file,
            manifest,
            written,
            ..
        } => {
            let mut line = format!(
                "{file}: {} -> {} ({})",
                manifest.from,
                manifest.to,
                join_versions(&manifest.applied)
            );
            if !written {
                line.push_str(" [dry run]");
            }
            line
        }
        Outcome::Current { file, version } => format!("{file}: already at {version}"),
        Outcome::Failed {
            file,
            error,
            applied,
            failed_at,
        } => {
            let mut text = format!("error: {file}: {error}");
            if let Some(step) = failed_at {
                text.push_str(&format!(
                    "\n  stopped at step {} ({}); ",
                    step.index + 1,
                    step.version
                ));
                if applied.is_empty() {
                    text.push_str("nothing applied");
                } else {
                    text.push_str(&format!("applied {}", join_versions(applied)));
                }
                text.push_str("; file left unchanged");
            }
            text
        }
    }
}

/// Load, migrate and write back one document.
pub fn migrate_file(
    migrator: &Migrator<'_>,
    path: &Path,
    target: Option<&SchemaVersion>,
    options: WriteOptions,
) -> Outcome {
    let (file, doc) = match super::load(path) {
        Ok(loaded) => loaded,
        Err(e) => return Outcome::failed(path, &e),
    };

    let migrated = match migrator.migrate(doc, target) {
        Ok(migrated) => migrated,
        Err(failure) => {
            return Outcome::Failed {
                file: display_path(path),
                error: failure.error.to_string(),
                applied: failure.applied,
                failed_at: failure.failed_at,
            };
        }
    };

    if migrated.manifest.is_noop() {
        return Outcome::Current {
            file: display_path(path),
            version: migrated.manifest.to,
        };
    }

    let mut backup = None;
    if !options.dry_run {
        match write_back(&file, &migrated.document, options.backup) {
            Ok(bak) => backup = bak,
            Err(e) => return Outcome::failed(path, &e),
        }
    }

    Outcome::Migrated {
        file: display_path(path),
        manifest: migrated.manifest,
        written: !options.dry_run,
        backup,
    }
}

/// Optionally back up, then atomically replace the file.
fn write_back(file: &DocumentFile, doc: &Value, backup: bool) -> Result<Option<PathBuf>> {
    let path = file.path();
    let bak = if backup {
        file.backup()
            .with_context(|| format!("failed to back up {}", path.display()))?
    } else {
        None
    };
    file.save(doc)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(bak)
}

pub fn handle(
    args: MigrateArgs,
    migrator: &Migrator<'_>,
    backup_enabled: bool,
    format: OutputFormat,
) -> Result<()> {
    let target = super::resolve_target(migrator.registry(), args.to.as_deref())?;
    let options = WriteOptions {
        dry_run: args.dry_run,
        backup: backup_enabled && !args.no_backup,
    };

    let mut outcomes = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let outcome = migrate_file(migrator, path, target.as_ref(), options);
        if let Outcome::Failed { error, .. } = &outcome {
            tracing::warn!(file = %path.display(), error = %error, "document not migrated");
        }
        if format == OutputFormat::Text {
            if outcome.is_failure() {
                eprintln!("{}", format_outcome(&outcome));
            } else {
                println!("{}", format_outcome(&outcome));
            }
        }
        outcomes.push(outcome);
    }

    if format == OutputFormat::Json {
        print_json(&outcomes)?;
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        return Err(ExitError::new(
            EXIT_FAILED,
            format!("{failed} of {} documents failed to migrate", outcomes.len()),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
