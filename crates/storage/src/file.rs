// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A document file on disk.
//!
//! Saving writes to a sibling `<name>.tmp`, syncs it and renames it over the
//! document, so an interrupted save leaves either the old or the new
//! document in place, never a half-written one. Backups are plain copies
//! rotated through `<name>.bak`, `<name>.bak.2` and `<name>.bak.3`.

use crate::{Format, StoreError};
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of backups kept per document.
pub const MAX_BAK_FILES: u32 = 3;

/// A document path paired with the format it is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    path: PathBuf,
    format: Format,
}

impl DocumentFile {
    /// Refer to `path`, detecting the format from its extension.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let format = Format::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Refer to `path` stored as `format`, whatever its extension.
    pub fn with_format(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read and parse the document.
    pub fn load(&self) -> Result<Value, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        let doc = self.format.parse(&text)?;
        debug!(path = %self.path.display(), format = %self.format, "loaded document");
        Ok(doc)
    }

    /// Render `doc` and atomically replace the file with it.
    pub fn save(&self, doc: &Value) -> Result<(), StoreError> {
        let text = self.format.render(doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = sibling(&self.path, "tmp");
        if let Err(e) = write_synced(&tmp_path, text.as_bytes()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), bytes = text.len(), "saved document");
        Ok(())
    }

    /// Copy the current file to `<name>.bak`, rotating older backups out.
    ///
    /// Returns the backup path, or `None` when there is no file to back up.
    pub fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bak_path = rotate_bak_path(&self.path)?;
        fs::copy(&self.path, &bak_path)?;
        debug!(
            path = %self.path.display(),
            bak = %bak_path.display(),
            "backed up document"
        );
        Ok(Some(bak_path))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// `path` with `.suffix` appended to its file name (`spec.json` -> `spec.json.bak`).
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups. The oldest is removed when the
/// limit is reached. Fails if an existing backup cannot be moved, so the
/// caller never overwrites one.
pub(crate) fn rotate_bak_path(path: &Path) -> std::io::Result<PathBuf> {
    let bak = |n: u32| {
        if n == 1 {
            sibling(path, "bak")
        } else {
            sibling(path, &format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            fs::rename(&src, bak(n + 1))?;
        }
    }

    Ok(bak(1))
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
