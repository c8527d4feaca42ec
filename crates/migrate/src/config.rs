// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration

use serde::{Deserialize, Serialize};

/// What to do with a document that declares no schema version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnversionedPolicy {
    /// Treat it as being at the registry's baseline version.
    #[default]
    AssumeBaseline,
    /// Refuse to migrate it.
    Reject,
}

/// Configuration for [`Migrator`](crate::Migrator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(default)]
    pub unversioned: UnversionedPolicy,
}

impl MigrationConfig {
    pub fn with_unversioned(mut self, policy: UnversionedPolicy) -> Self {
        self.unversioned = policy;
        self
    }
}
