// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake file watcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FileWatcher, WatchError, WatchEvent, WatchOp};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Recorded watcher call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCall {
    Add { root: PathBuf },
    Remove { root: PathBuf },
    Subscribe,
}

/// Watcher driven by the test instead of the filesystem
#[derive(Clone, Default)]
pub struct FakeWatcher {
    calls: Arc<Mutex<Vec<WatchCall>>>,
    sender: Arc<Mutex<Option<mpsc::Sender<WatchEvent>>>>,
}

impl FakeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WatchCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Deliver an event to the current subscriber
    ///
    /// Returns false when nobody is subscribed.
    pub async fn emit(&self, event: WatchEvent) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match sender {
            Some(sender) => sender.send(event).await.is_ok(),
            None => false,
        }
    }

    pub async fn create(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(WatchEvent::new(WatchOp::Create, path, 0)).await
    }

    pub async fn write(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(WatchEvent::new(WatchOp::Write, path, 0)).await
    }

    pub async fn remove_file(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(WatchEvent::new(WatchOp::Remove, path, 0)).await
    }

    fn record(&self, call: WatchCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl FileWatcher for FakeWatcher {
    async fn add(&self, root: &Path) -> Result<(), WatchError> {
        self.record(WatchCall::Add {
            root: root.to_path_buf(),
        });
        Ok(())
    }

    async fn remove(&self, root: &Path) -> Result<(), WatchError> {
        self.record(WatchCall::Remove {
            root: root.to_path_buf(),
        });
        Ok(())
    }

    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<WatchEvent> {
        self.record(WatchCall::Subscribe);
        let (tx, rx) = mpsc::channel(64);
        *self.sender.lock().unwrap_or_else(|e| e.into_inner()) = Some(tx);

        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            cancel.cancelled().await;
            sender.lock().unwrap_or_else(|e| e.into_inner()).take();
        });
        rx
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
