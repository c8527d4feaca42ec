// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered catalog of migration units.
//!
//! The registry knows an explicit baseline version (the oldest schema it
//! understands, with no unit of its own) plus one unit per newer version.
//! Moving a document from `a` to `b` applies the units in `(a, b]`
//! ascending, or the units in `(b, a]` descending through `downgrade`.

use crate::{Direction, Migration, MigrationError, SchemaVersion};
use std::collections::BTreeMap;
use std::fmt;

/// Registry of migration units, keyed by the version each upgrades to.
pub struct MigrationRegistry {
    baseline: SchemaVersion,
    units: BTreeMap<SchemaVersion, Box<dyn Migration>>,
}

impl MigrationRegistry {
    /// Create an empty registry whose oldest known version is `baseline`.
    pub fn new(baseline: SchemaVersion) -> Self {
        Self {
            baseline,
            units: BTreeMap::new(),
        }
    }

    /// Add a unit.
    ///
    /// Fails if a unit (or the baseline) already claims the unit's version,
    /// or if the unit is older than the baseline.
    pub fn register(&mut self, unit: Box<dyn Migration>) -> Result<(), MigrationError> {
        let version = unit.version().clone();
        if version == self.baseline || self.units.contains_key(&version) {
            return Err(MigrationError::DuplicateVersion(version));
        }
        if version < self.baseline {
            return Err(MigrationError::BelowBaseline {
                version,
                baseline: self.baseline.clone(),
            });
        }
        tracing::debug!(
            version = %version,
            description = unit.description(),
            "registered migration"
        );
        self.units.insert(version, unit);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, unit: Box<dyn Migration>) -> Result<Self, MigrationError> {
        self.register(unit)?;
        Ok(self)
    }

    /// The oldest version this registry understands.
    pub fn baseline(&self) -> &SchemaVersion {
        &self.baseline
    }

    /// The newest known version: the highest unit, or the baseline when empty.
    pub fn latest_version(&self) -> &SchemaVersion {
        self.units
            .keys()
            .next_back()
            .unwrap_or(&self.baseline)
    }

    /// Every known version in ascending order, baseline first.
    ///
    /// Each call yields a fresh iterator; the iterator is also `Clone`.
    pub fn versions(&self) -> impl Iterator<Item = &SchemaVersion> + Clone + '_ {
        std::iter::once(&self.baseline).chain(self.units.keys())
    }

    /// The registered spelling of a version equal to `version`, if known.
    pub fn resolve(&self, version: &SchemaVersion) -> Option<&SchemaVersion> {
        if *version == self.baseline {
            return Some(&self.baseline);
        }
        self.units.get_key_value(version).map(|(k, _)| k)
    }

    pub fn contains(&self, version: &SchemaVersion) -> bool {
        self.resolve(version).is_some()
    }

    /// The unit that upgrades to `version`.
    pub fn get(&self, version: &SchemaVersion) -> Option<&dyn Migration> {
        self.units.get(version).map(|u| u.as_ref())
    }

    /// All units in ascending version order.
    pub fn units(&self) -> impl Iterator<Item = &dyn Migration> + '_ {
        self.units.values().map(|u| u.as_ref())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The known version immediately below `version`, i.e. where the unit
    /// for `version` downgrades to.
    pub fn previous_version(&self, version: &SchemaVersion) -> Option<&SchemaVersion> {
        if *version <= self.baseline {
            return None;
        }
        self.units
            .range(..version)
            .next_back()
            .map(|(k, _)| k)
            .or(Some(&self.baseline))
    }

    /// Resolve the ordered steps that move a document from `from` to `to`.
    ///
    /// Both versions must be known. Moving forward yields the units in
    /// `(from, to]` ascending; moving backward yields the units in
    /// `(to, from]` descending, each to be applied through `downgrade`.
    pub fn units_between(
        &self,
        from: &SchemaVersion,
        to: &SchemaVersion,
    ) -> Result<MigrationPlan<'_>, MigrationError> {
        let from = self
            .resolve(from)
            .ok_or_else(|| MigrationError::UnknownVersion(from.to_string()))?;
        let to = self
            .resolve(to)
            .ok_or_else(|| MigrationError::UnknownVersion(to.to_string()))?;

        let direction = Direction::between(from, to);
        let steps = match direction {
            Direction::NoOp => Vec::new(),
            Direction::Upgrade => self
                .units
                .range(from..=to)
                .filter(|(v, _)| *v > from)
                .map(|(v, unit)| PlanStep {
                    unit: unit.as_ref(),
                    lands_on: v,
                })
                .collect(),
            Direction::Downgrade => {
                let mut steps = Vec::new();
                for (v, unit) in self.units.range(to..=from).rev() {
                    if v <= to {
                        continue;
                    }
                    let lands_on = self
                        .previous_version(v)
                        .ok_or_else(|| MigrationError::UnknownVersion(v.to_string()))?;
                    steps.push(PlanStep {
                        unit: unit.as_ref(),
                        lands_on,
                    });
                }
                steps
            }
        };

        Ok(MigrationPlan {
            from,
            to,
            direction,
            steps,
        })
    }
}

impl fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("baseline", &self.baseline)
            .field("versions", &self.units.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One step of a [`MigrationPlan`].
#[derive(Clone, Copy)]
pub struct PlanStep<'r> {
    /// The unit to apply (through `upgrade` or `downgrade`, per the plan's direction).
    pub unit: &'r dyn Migration,
    /// The version the document is at once this step has been applied.
    pub lands_on: &'r SchemaVersion,
}

impl fmt::Debug for PlanStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStep")
            .field("unit", self.unit.version())
            .field("lands_on", self.lands_on)
            .finish()
    }
}

/// The resolved path between two versions.
#[derive(Debug, Clone)]
pub struct MigrationPlan<'r> {
    /// Registered spelling of the starting version.
    pub from: &'r SchemaVersion,
    /// Registered spelling of the target version.
    pub to: &'r SchemaVersion,
    pub direction: Direction,
    pub steps: Vec<PlanStep<'r>>,
}

impl MigrationPlan<'_> {
    /// Versions of the units in application order.
    pub fn unit_versions(&self) -> Vec<&SchemaVersion> {
        self.steps.iter().map(|s| s.unit.version()).collect()
    }

    pub fn is_noop(&self) -> bool {
        self.direction == Direction::NoOp
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
