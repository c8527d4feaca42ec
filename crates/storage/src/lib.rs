// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Loading and saving specification documents on disk.
//!
//! Documents are read into [`serde_json::Value`] trees regardless of their
//! on-disk format, and written back in the same format they came from.

mod error;
mod file;
mod format;

pub use error::StoreError;
pub use file::{DocumentFile, MAX_BAK_FILES};
pub use format::Format;
