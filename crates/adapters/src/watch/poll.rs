// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval-scanning file watcher

use super::{has_extension, FileWatcher, WatchError, WatchEvent, WatchOp};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const CHANNEL_CAPACITY: usize = 256;

/// Polling watcher settings
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub interval: Duration,
    /// Extensions to report, without the dot
    pub extensions: Vec<String>,
    /// Report files present when a root is first scanned as `Create`
    pub emit_existing: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            extensions: vec!["lgp".to_string(), "lgd".to_string()],
            emit_existing: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileState {
    size: u64,
    modified: Option<SystemTime>,
}

/// Watcher that rescans registered trees on a fixed interval
///
/// Each subscription keeps its own snapshot and compares size and
/// modification time between scans.
#[derive(Clone)]
pub struct PollWatcher {
    config: Arc<WatchConfig>,
    roots: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl PollWatcher {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            config: Arc::new(config),
            roots: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.roots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FileWatcher for PollWatcher {
    async fn add(&self, root: &Path) -> Result<(), WatchError> {
        let metadata = tokio::fs::metadata(root).await?;
        if !metadata.is_dir() {
            return Err(WatchError::NotADirectory(root.to_path_buf()));
        }
        self.roots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(root.to_path_buf());
        tracing::info!(root = %root.display(), "watching");
        Ok(())
    }

    async fn remove(&self, root: &Path) -> Result<(), WatchError> {
        let removed = self
            .roots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(root);
        if removed {
            tracing::info!(root = %root.display(), "stopped watching");
        }
        Ok(())
    }

    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<WatchEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run(self.clone(), tx, cancel));
        rx
    }
}

async fn run(watcher: PollWatcher, tx: mpsc::Sender<WatchEvent>, cancel: CancellationToken) {
    let mut scanner = Scanner::default();
    let mut ticker = tokio::time::interval(watcher.config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let roots = watcher.roots();
        for event in scanner.scan(&watcher.config, &roots) {
            tracing::trace!(op = ?event.op, path = %event.path.display(), size = event.size, "change");
            if tx.send(event).await.is_err() {
                return;
            }
        }
    }
    tracing::debug!("watch loop stopped");
}

#[derive(Default)]
struct Scanner {
    seen_roots: BTreeSet<PathBuf>,
    snapshot: HashMap<PathBuf, FileState>,
}

impl Scanner {
    fn scan(&mut self, config: &WatchConfig, roots: &[PathBuf]) -> Vec<WatchEvent> {
        let mut current = HashMap::new();
        for root in roots {
            let fresh = !self.seen_roots.contains(root);
            let mut found = HashMap::new();
            collect_files(root, &config.extensions, &mut found);
            if fresh && !config.emit_existing {
                self.snapshot.extend(found.iter().map(|(p, s)| (p.clone(), *s)));
            }
            current.extend(found);
        }
        self.seen_roots = roots.iter().cloned().collect();

        let mut events = Vec::new();
        for (path, state) in &current {
            match self.snapshot.get(path) {
                None => events.push(WatchEvent::new(WatchOp::Create, path.clone(), state.size)),
                Some(previous) if previous != state => {
                    events.push(WatchEvent::new(WatchOp::Write, path.clone(), state.size))
                }
                Some(_) => {}
            }
        }
        for path in self.snapshot.keys() {
            // Files under an unwatched root disappear silently
            let watched = roots.iter().any(|root| path.starts_with(root));
            if watched && !current.contains_key(path) {
                events.push(WatchEvent::new(WatchOp::Remove, path.clone(), 0));
            }
        }
        events.sort_by(|a, b| a.path.cmp(&b.path));

        self.snapshot = current;
        events
    }
}

fn collect_files(root: &Path, extensions: &[String], found: &mut HashMap<PathBuf, FileState>) {
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to scan directory");
                continue;
            }
        };
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if metadata.is_dir() {
                pending.push(path);
            } else if metadata.is_file() && has_extension(&path, extensions) {
                found.insert(
                    path,
                    FileState {
                        size: metadata.len(),
                        modified: metadata.modified().ok(),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
