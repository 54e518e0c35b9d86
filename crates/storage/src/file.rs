// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-backed journal

use crate::journal::{Journal, JournalError};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Journal persisted as a JSON object of `path -> offset`
///
/// Every update rewrites the file through a temp file and a rename, so a
/// crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    offsets: Mutex<BTreeMap<PathBuf, u64>>,
}

impl FileJournal {
    /// Open a journal, loading existing entries; a missing file is empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let path = path.into();
        let offsets = match fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), entries = offsets.len(), "opened journal");
        Ok(Self {
            path,
            offsets: Mutex::new(offsets),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, offsets: &BTreeMap<PathBuf, u64>) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(offsets)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Journal for FileJournal {
    fn offset(&self, path: &Path) -> u64 {
        self.offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn set_offset(&self, path: &Path, offset: u64) -> Result<(), JournalError> {
        let mut offsets = self.offsets.lock().unwrap_or_else(|e| e.into_inner());
        if offsets.get(path) == Some(&offset) {
            return Ok(());
        }
        offsets.insert(path.to_path_buf(), offset);
        self.persist(&offsets)
    }

    fn forget(&self, path: &Path) -> Result<(), JournalError> {
        let mut offsets = self.offsets.lock().unwrap_or_else(|e| e.into_inner());
        if offsets.remove(path).is_none() {
            return Ok(());
        }
        self.persist(&offsets)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
