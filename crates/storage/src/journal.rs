// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offset journal contract

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur persisting offsets
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from data file to the last consumed byte offset
pub trait Journal: Send + Sync + 'static {
    /// Last recorded offset, 0 when unknown
    fn offset(&self, path: &Path) -> u64;

    fn set_offset(&self, path: &Path, offset: u64) -> Result<(), JournalError>;

    /// Drop the entry for a file that no longer exists
    fn forget(&self, path: &Path) -> Result<(), JournalError>;
}

/// Journal that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryJournal {
    offsets: Mutex<HashMap<PathBuf, u64>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all entries
    pub fn entries(&self) -> HashMap<PathBuf, u64> {
        self.offsets.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Journal for MemoryJournal {
    fn offset(&self, path: &Path) -> u64 {
        self.offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn set_offset(&self, path: &Path, offset: u64) -> Result<(), JournalError> {
        self.offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), offset);
        Ok(())
    }

    fn forget(&self, path: &Path) -> Result<(), JournalError> {
        self.offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
