// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::sync::Arc;
use std::time::Instant;

use lgship_adapters::{FileWatcher, JsonLinesSink, PollWatcher, Sink, SinkError, TracedSink};
use lgship_engine::{Manager, ManagerError};
use lgship_storage::{FileJournal, Journal, JournalError, MemoryJournal};
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Failed to open output: {0}")]
    Sink(#[from] SinkError),

    #[error("Watch error: {0}")]
    Manager(#[from] ManagerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log file path")]
    NoLogDir,
}

/// Running daemon
pub struct Daemon<W> {
    pub manager: Manager<W>,
    /// When daemon started
    pub start_time: Instant,
}

/// Build the journal, sink and watcher from config and start watching
pub async fn startup(config: &Config) -> Result<Daemon<PollWatcher>, LifecycleError> {
    let journal = open_journal(config)?;
    let sink = open_sink(config)?;
    let watcher = PollWatcher::new(config.watch_config());
    start_with(watcher, journal, vec![sink], config).await
}

/// Start a manager over already built collaborators
pub async fn start_with<W: FileWatcher>(
    watcher: W,
    journal: Arc<dyn Journal>,
    sinks: Vec<Arc<dyn Sink>>,
    config: &Config,
) -> Result<Daemon<W>, LifecycleError> {
    let manager = Manager::new(watcher, journal, sinks, config.manager_config());
    manager.start();
    for folder in &config.folders {
        if let Err(e) = manager.watch(folder).await {
            manager.shutdown().await;
            return Err(e.into());
        }
    }
    Ok(Daemon {
        manager,
        start_time: Instant::now(),
    })
}

impl<W: FileWatcher> Daemon<W> {
    /// Stop every exporter and wait for their offsets to be journaled
    pub async fn shutdown(self) {
        info!("Shutting down daemon...");
        self.manager.shutdown().await;
        info!(
            uptime_secs = self.start_time.elapsed().as_secs(),
            "Daemon shutdown complete"
        );
    }
}

fn open_journal(config: &Config) -> Result<Arc<dyn Journal>, LifecycleError> {
    match &config.journal {
        Some(path) => {
            let journal = FileJournal::open(path)?;
            info!(path = %path.display(), "journal opened");
            Ok(Arc::new(journal))
        }
        None => {
            info!("no journal configured, offsets are kept in memory");
            Ok(Arc::new(MemoryJournal::new()))
        }
    }
}

fn open_sink(config: &Config) -> Result<Arc<dyn Sink>, LifecycleError> {
    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Arc::new(TracedSink::new("jsonl", JsonLinesSink::append(path)?)))
        }
        None => Ok(Arc::new(TracedSink::new("stdout", JsonLinesSink::stdout()))),
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
