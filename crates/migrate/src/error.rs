// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for migration resolution and execution

use crate::SchemaVersion;
use thiserror::Error;

/// Errors that can occur while registering or running migrations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("invalid version format {input:?}: {reason}")]
    InvalidVersionFormat { input: String, reason: String },

    #[error("unknown schema version {0}")]
    UnknownVersion(String),

    #[error("a migration for version {0} is already registered")]
    DuplicateVersion(SchemaVersion),

    #[error("migration {version} is older than the baseline version {baseline}")]
    BelowBaseline {
        version: SchemaVersion,
        baseline: SchemaVersion,
    },

    #[error("document does not declare metadata.schema_version")]
    MissingVersion,

    #[error("invalid document at `{path}`: {reason}")]
    InvalidDocument { path: String, reason: String },

    #[error("migration {version} failed at `{path}`: {reason}")]
    MalformedDocument {
        version: SchemaVersion,
        path: String,
        reason: String,
    },
}

impl MigrationError {
    /// The migration version the error is attributed to, if any.
    pub fn version(&self) -> Option<&SchemaVersion> {
        match self {
            Self::DuplicateVersion(v) => Some(v),
            Self::BelowBaseline { version, .. } | Self::MalformedDocument { version, .. } => {
                Some(version)
            }
            _ => None,
        }
    }
}
