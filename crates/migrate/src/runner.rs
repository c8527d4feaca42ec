// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applies a migration plan to a single document.
//!
//! ## Lifecycle of one `migrate` call
//!
//! ```text
//! Resolved ──► Applying(0) ──► Applying(1) ──► ... ──► Completed
//!                  │               │
//!                  └──► Failed(i) ◄┘
//! ```
//!
//! Resolution (declared version, target, plan) happens before any unit
//! runs; errors there hand the caller's document back untouched. Each step
//! runs against the output of the previous one. When step `i` fails, the
//! document as it was before step `i` is returned together with the
//! versions already applied. Nothing is rolled back automatically and
//! nothing is persisted.

use crate::document;
use crate::{
    builtin, Direction, MigrationConfig, MigrationError, MigrationPlan, MigrationRegistry,
    SchemaVersion, UnversionedPolicy,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// What a successful `migrate` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// The version the document was at (after applying the unversioned policy).
    pub from: SchemaVersion,
    pub to: SchemaVersion,
    pub direction: Direction,
    /// Unit versions applied, in order. Empty for a no-op.
    pub applied: Vec<SchemaVersion>,
}

impl Manifest {
    /// Nothing to do: the document was already at the target version.
    pub fn is_noop(&self) -> bool {
        self.direction == Direction::NoOp
    }
}

/// A successfully migrated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated {
    pub document: Value,
    pub manifest: Manifest,
}

/// The step at which a migration stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedStep {
    /// Position in the plan, starting at 0.
    pub index: usize,
    /// Version of the unit that failed.
    pub version: SchemaVersion,
}

/// A failed `migrate` call.
///
/// `document` is the input to the failing step: the caller's document when
/// resolution failed (`failed_at` is `None`), otherwise the result of the
/// last successful step. The caller decides whether to keep it.
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct MigrationFailure {
    pub document: Value,
    pub applied: Vec<SchemaVersion>,
    pub failed_at: Option<FailedStep>,
    #[source]
    pub error: MigrationError,
}

impl MigrationFailure {
    fn before_start(document: Value, error: MigrationError) -> Self {
        Self {
            document,
            applied: Vec::new(),
            failed_at: None,
            error,
        }
    }
}

/// Runs migrations from a registry against documents.
#[derive(Debug, Clone)]
pub struct Migrator<'r> {
    registry: &'r MigrationRegistry,
    config: MigrationConfig,
}

impl<'r> Migrator<'r> {
    pub fn new(registry: &'r MigrationRegistry) -> Self {
        Self::with_config(registry, MigrationConfig::default())
    }

    pub fn with_config(registry: &'r MigrationRegistry, config: MigrationConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r MigrationRegistry {
        self.registry
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// The version `doc` is at, per `metadata.schema_version` and the
    /// unversioned policy. The version is not checked against the registry.
    pub fn declared_version(&self, doc: &Value) -> Result<SchemaVersion, MigrationError> {
        let declared = document::declared_version(doc).map_err(|m| {
            MigrationError::InvalidDocument {
                path: m.path,
                reason: m.reason,
            }
        })?;

        match declared {
            Some(Value::String(s)) => SchemaVersion::parse(s),
            Some(other) => {
                let mut reason = format!(
                    "schema_version must be a string, found {}",
                    document::kind_of(other)
                );
                // Unquoted `schema_version: 1.0` in YAML parses as a number.
                if other.is_number() {
                    reason.push_str(&format!(" (quote it: \"{other}\")"));
                }
                Err(MigrationError::InvalidVersionFormat {
                    input: other.to_string(),
                    reason,
                })
            }
            None => match self.config.unversioned {
                UnversionedPolicy::AssumeBaseline => {
                    tracing::debug!(
                        baseline = %self.registry.baseline(),
                        "document has no schema_version, assuming baseline"
                    );
                    Ok(self.registry.baseline().clone())
                }
                UnversionedPolicy::Reject => Err(MigrationError::MissingVersion),
            },
        }
    }

    /// Resolve the steps that would move `doc` to `target` (default: the
    /// registry's latest version) without running them.
    pub fn plan(
        &self,
        doc: &Value,
        target: Option<&SchemaVersion>,
    ) -> Result<MigrationPlan<'r>, MigrationError> {
        if !doc.is_object() {
            return Err(MigrationError::InvalidDocument {
                path: document::ROOT.to_string(),
                reason: format!("expected a map, found {}", document::kind_of(doc)),
            });
        }

        let target = target.unwrap_or_else(|| self.registry.latest_version());
        // Reject an unknown target before looking at the document's own version.
        if !self.registry.contains(target) {
            return Err(MigrationError::UnknownVersion(target.to_string()));
        }

        let from = self.declared_version(doc)?;
        let plan = self.registry.units_between(&from, target)?;
        tracing::debug!(
            from = %plan.from,
            to = %plan.to,
            direction = %plan.direction,
            steps = plan.steps.len(),
            "resolved migration plan"
        );
        Ok(plan)
    }

    /// Migrate `doc` to `target` (default: the registry's latest version).
    pub fn migrate(
        &self,
        doc: Value,
        target: Option<&SchemaVersion>,
    ) -> Result<Migrated, MigrationFailure> {
        let plan = match self.plan(&doc, target) {
            Ok(plan) => plan,
            Err(error) => return Err(MigrationFailure::before_start(doc, error)),
        };

        let mut manifest = Manifest {
            from: plan.from.clone(),
            to: plan.to.clone(),
            direction: plan.direction,
            applied: Vec::with_capacity(plan.steps.len()),
        };

        if plan.is_noop() {
            tracing::debug!(version = %plan.from, "document already at target version");
            return Ok(Migrated {
                document: doc,
                manifest,
            });
        }

        let mut doc = doc;
        for (index, step) in plan.steps.iter().enumerate() {
            let version = step.unit.version();
            let input = doc.clone();

            let result = match plan.direction {
                Direction::Upgrade => step.unit.upgrade(&mut doc),
                Direction::Downgrade => step.unit.downgrade(&mut doc),
                Direction::NoOp => Ok(()),
            }
            .and_then(|()| document::stamp_version(&mut doc, step.lands_on));

            if let Err(malformed) = result {
                tracing::warn!(
                    version = %version,
                    direction = %plan.direction,
                    index,
                    path = %malformed.path,
                    reason = %malformed.reason,
                    "migration step failed"
                );
                return Err(MigrationFailure {
                    document: input,
                    applied: manifest.applied,
                    failed_at: Some(FailedStep {
                        index,
                        version: version.clone(),
                    }),
                    error: MigrationError::MalformedDocument {
                        version: version.clone(),
                        path: malformed.path,
                        reason: malformed.reason,
                    },
                });
            }

            tracing::debug!(
                version = %version,
                direction = %plan.direction,
                now_at = %step.lands_on,
                "applied migration step"
            );
            manifest.applied.push(version.clone());
        }

        tracing::info!(
            from = %manifest.from,
            to = %manifest.to,
            steps = manifest.applied.len(),
            "migrated document"
        );
        Ok(Migrated {
            document: doc,
            manifest,
        })
    }

    /// [`migrate`](Self::migrate) to a target given as a string.
    pub fn migrate_to(&self, doc: Value, target: &str) -> Result<Migrated, MigrationFailure> {
        match SchemaVersion::parse(target) {
            Ok(target) => self.migrate(doc, Some(&target)),
            Err(error) => Err(MigrationFailure::before_start(doc, error)),
        }
    }
}

/// Migrate `doc` with the built-in registry and default configuration.
///
/// `target` defaults to the latest built-in version.
pub fn migrate(doc: Value, target: Option<&str>) -> Result<Migrated, MigrationFailure> {
    let registry = match builtin::registry() {
        Ok(registry) => registry,
        Err(error) => return Err(MigrationFailure::before_start(doc, error)),
    };
    let migrator = Migrator::new(registry);
    match target {
        Some(target) => migrator.migrate_to(doc, target),
        None => migrator.migrate(doc, None),
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
