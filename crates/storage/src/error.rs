// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing documents
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unsupported document format: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("`{path}`: {reason} cannot be stored without changing it")]
    Unrepresentable { path: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
