// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Exit code for documents that failed to load, validate or migrate.
pub const EXIT_FAILED: i32 = 1;

/// Exit code for bad invocations and unusable configuration.
pub const EXIT_USAGE: i32 = 2;

/// An error that carries the process exit code.
///
/// An empty message means the failure was already reported.
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
