// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

// --- Configuration ---

/// Explicit config file: SPECDOC_CONFIG
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("SPECDOC_CONFIG")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Logging ---

/// Tracing filter directive: SPECDOC_LOG
pub fn log_filter() -> Option<String> {
    std::env::var("SPECDOC_LOG").ok().filter(|s| !s.is_empty())
}

// --- Backups ---

/// SPECDOC_NO_BACKUP set to any value disables backups.
pub fn no_backup() -> bool {
    std::env::var_os("SPECDOC_NO_BACKUP").is_some()
}
