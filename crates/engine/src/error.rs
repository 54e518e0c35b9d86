// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use lgship_adapters::WatchError;
use thiserror::Error;

/// Errors from a single exporter run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("exporter started without a poller")]
    MissingPoller,
    #[error("poller task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors from the worker pool
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("cancelled while waiting for a pool slot")]
    Cancelled,
    #[error("worker pool closed")]
    Closed,
}

/// Errors from the manager
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("watch error: {0}")]
    Watch(#[from] WatchError),
}
