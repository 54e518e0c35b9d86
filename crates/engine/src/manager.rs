// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory watch, per-file exporters, offset journal

use crate::error::ManagerError;
use crate::exporter::Exporter;
use crate::poller::{LongPoller, Poller};
use crate::pool::WorkerPool;
use lgship_adapters::{FileWatcher, Sink, WatchEvent, WatchOp};
use lgship_core::{LogReader, ReaderError, ReaderOptions, Severity};
use lgship_storage::Journal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Manager tuning
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Exporters allowed to run at once
    pub pool_size: usize,
    /// Events per read
    pub bulk_size: usize,
    /// Deadline for a single read; zero disables it
    pub read_timeout: Duration,
    /// Severities to forward; empty forwards everything
    pub allowed_severity: Vec<Severity>,
    /// Shared dictionary; each data file's own `1Cv8.lgf` when unset
    pub metadata_path: Option<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            bulk_size: 100,
            read_timeout: Duration::from_secs(1),
            allowed_severity: Vec::new(),
            metadata_path: None,
        }
    }
}

/// Registry entry for a file with a live exporter task
struct Slot {
    stop: CancellationToken,
    /// A change arrived while running
    rerun: bool,
    /// The file was deleted while running
    removed: bool,
    /// The file was deleted and created again while running
    recreated: bool,
}

struct Inner<W> {
    watcher: W,
    pool: WorkerPool,
    journal: Arc<dyn Journal>,
    sinks: Vec<Arc<dyn Sink>>,
    poller: Arc<dyn Poller>,
    metadata_path: Option<PathBuf>,
    registry: Mutex<HashMap<PathBuf, Slot>>,
    cancel: CancellationToken,
    tasks: TaskTracker,
    idle: Notify,
    started: AtomicBool,
}

/// Turns file change notifications into exporter runs
///
/// At most one exporter exists per path. Each consumes a pool slot while it
/// runs and records its final offset in the journal when it ends. The
/// registry and the journal are only touched under the registry lock.
pub struct Manager<W> {
    inner: Arc<Inner<W>>,
}

impl<W> Clone for Manager<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: FileWatcher> Manager<W> {
    pub fn new(
        watcher: W,
        journal: Arc<dyn Journal>,
        sinks: Vec<Arc<dyn Sink>>,
        config: ManagerConfig,
    ) -> Self {
        let poller = LongPoller::new(config.bulk_size, config.read_timeout)
            .with_severity(config.allowed_severity);
        Self {
            inner: Arc::new(Inner {
                watcher,
                pool: WorkerPool::new(config.pool_size),
                journal,
                sinks,
                poller: Arc::new(poller),
                metadata_path: config.metadata_path,
                registry: Mutex::new(HashMap::new()),
                cancel: CancellationToken::new(),
                tasks: TaskTracker::new(),
                idle: Notify::new(),
                started: AtomicBool::new(false),
            }),
        }
    }

    /// Start watching a directory tree
    pub async fn watch(&self, dir: &Path) -> Result<(), ManagerError> {
        self.inner.watcher.add(dir).await?;
        tracing::info!(dir = %dir.display(), "watching");
        Ok(())
    }

    /// Stop watching a directory tree and stop its running exporters
    ///
    /// Journal entries are kept, so a later `watch` resumes where these
    /// exporters stopped.
    pub async fn unwatch(&self, dir: &Path) -> Result<(), ManagerError> {
        self.inner.watcher.remove(dir).await?;
        for (path, slot) in self.registry().iter_mut() {
            if path.starts_with(dir) {
                slot.rerun = false;
                slot.recreated = false;
                slot.stop.cancel();
            }
        }
        tracing::info!(dir = %dir.display(), "unwatched");
        Ok(())
    }

    /// Subscribe to the watcher and start dispatching; later calls do nothing
    pub fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut events = self.inner.watcher.subscribe(self.inner.cancel.child_token());
        let manager = self.clone();
        self.inner.tasks.spawn(async move {
            loop {
                let event = tokio::select! {
                    biased;
                    _ = manager.inner.cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };
                manager.dispatch(event);
            }
            tracing::debug!("watch dispatch stopped");
        });
    }

    /// Number of files with a live exporter task
    pub fn running(&self) -> usize {
        self.registry().len()
    }

    /// Paths with a live exporter task, sorted
    pub fn active_exporters(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.registry().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Signal every task to stop without waiting
    pub fn stop(&self) {
        self.inner.cancel.cancel();
    }

    /// Stop and wait for the dispatch loop and every exporter to finish
    pub async fn shutdown(&self) {
        self.stop();
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        tracing::info!("manager stopped");
    }

    /// Wait until no exporter task is registered
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.running() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<PathBuf, Slot>> {
        self.inner
            .registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn dispatch(&self, event: WatchEvent) {
        let WatchEvent { op, path, size } = event;
        let mut registry = self.registry();
        match op {
            WatchOp::Create | WatchOp::Write => {
                if let Some(slot) = registry.get_mut(&path) {
                    if slot.removed {
                        slot.removed = false;
                        slot.recreated = true;
                        tracing::info!(path = %path.display(), size, "file recreated, restart queued");
                    } else {
                        slot.rerun = true;
                        tracing::debug!(path = %path.display(), size, "exporter busy, rerun queued");
                    }
                    return;
                }
                if self.inner.cancel.is_cancelled() {
                    return;
                }
                let stop = self.inner.cancel.child_token();
                registry.insert(
                    path.clone(),
                    Slot {
                        stop: stop.clone(),
                        rerun: false,
                        removed: false,
                        recreated: false,
                    },
                );
                tracing::debug!(path = %path.display(), size, "exporter scheduled");
                self.inner.tasks.spawn(self.clone().run_file(path, stop));
            }
            WatchOp::Remove => match registry.get_mut(&path) {
                Some(slot) => {
                    slot.removed = true;
                    slot.recreated = false;
                    slot.stop.cancel();
                    tracing::info!(path = %path.display(), "file removed, stopping exporter");
                }
                None => self.forget(&path),
            },
        }
    }

    async fn run_file(self, path: PathBuf, mut stop: CancellationToken) {
        loop {
            let offset = self.export_once(&path, &stop).await;
            let manager = self.clone();
            let file = path.clone();
            match tokio::task::spawn_blocking(move || manager.finish(&file, offset)).await {
                Ok(Some(next)) => stop = next,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "exporter bookkeeping failed");
                    self.release(&path);
                    break;
                }
            }
            tracing::debug!(path = %path.display(), "rerunning exporter");
        }
    }

    /// One exporter run; the offset to journal, if the run got that far
    async fn export_once(&self, path: &Path, stop: &CancellationToken) -> Option<u64> {
        let _permit = match self.inner.pool.acquire(stop).await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no pool slot");
                return None;
            }
        };

        let options = ReaderOptions {
            metadata_path: self.inner.metadata_path.clone(),
            offset: self.inner.journal.offset(path),
        };
        let reader = match LogReader::open(path, options) {
            Ok(reader) => reader,
            Err(ReaderError::MetadataNotFound(metadata)) => {
                tracing::warn!(
                    path = %path.display(),
                    metadata = %metadata.display(),
                    "metadata not found"
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open data file");
                return None;
            }
        };

        let exporter = Exporter::new(reader)
            .with_poller(Arc::clone(&self.inner.poller))
            .with_sinks(self.inner.sinks.iter().cloned())
            .with_stop(stop.clone());
        match exporter.run().await {
            Ok(report) => Some(report.offset),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "exporter failed");
                None
            }
        }
    }

    /// Record the outcome of a run; the stop token for the next run, if any
    ///
    /// Journal writes may hit the disk while the registry lock is held, so
    /// this runs on a blocking thread.
    fn finish(&self, path: &Path, offset: Option<u64>) -> Option<CancellationToken> {
        let mut registry = self.registry();
        let slot = registry.get_mut(path)?;

        if slot.recreated {
            // The new file starts over; the old offset means nothing for it
            self.forget(path);
            if !self.inner.cancel.is_cancelled() {
                slot.recreated = false;
                slot.rerun = false;
                slot.stop = self.inner.cancel.child_token();
                return Some(slot.stop.clone());
            }
            registry.remove(path);
        } else if slot.removed {
            registry.remove(path);
            self.forget(path);
        } else {
            if let Some(offset) = offset {
                if let Err(e) = self.inner.journal.set_offset(path, offset) {
                    tracing::error!(path = %path.display(), offset, error = %e, "failed to journal offset");
                }
            }
            if slot.rerun && !slot.stop.is_cancelled() {
                slot.rerun = false;
                return Some(slot.stop.clone());
            }
            registry.remove(path);
        }

        if registry.is_empty() {
            self.inner.idle.notify_waiters();
        }
        None
    }

    /// Drop a slot without touching the journal
    fn release(&self, path: &Path) {
        let mut registry = self.registry();
        registry.remove(path);
        if registry.is_empty() {
            self.inner.idle.notify_waiters();
        }
    }

    fn forget(&self, path: &Path) {
        if let Err(e) = self.inner.journal.forget(path) {
            tracing::error!(path = %path.display(), error = %e, "failed to forget offset");
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
