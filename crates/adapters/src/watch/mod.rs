// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File change notification

mod poll;

pub use poll::{PollWatcher, WatchConfig};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWatcher, WatchCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors from watch registration
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Kind of change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOp {
    Create,
    Write,
    Remove,
}

/// One observed change to a watched file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub op: WatchOp,
    pub path: PathBuf,
    /// File size at the time of the change; 0 for removals
    pub size: u64,
}

impl WatchEvent {
    pub fn new(op: WatchOp, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            op,
            path: path.into(),
            size,
        }
    }
}

/// Source of change notifications for files under registered roots
#[async_trait]
pub trait FileWatcher: Clone + Send + Sync + 'static {
    /// Start watching a directory tree
    async fn add(&self, root: &Path) -> Result<(), WatchError>;

    /// Stop watching a directory tree
    async fn remove(&self, root: &Path) -> Result<(), WatchError>;

    /// Stream of changes; the stream ends when `cancel` fires
    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<WatchEvent>;
}

/// Whether `path` has one of `extensions` (without the dot, ASCII case-insensitive)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext))
}
