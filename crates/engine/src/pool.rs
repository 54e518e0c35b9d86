// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded pool of exporter slots

use crate::error::PoolError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Counting pool; a permit is one running exporter
#[derive(Clone, Debug)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// Slot held until dropped
#[derive(Debug)]
pub struct PoolPermit {
    _permit: OwnedSemaphorePermit,
}

impl WorkerPool {
    /// Pool with `capacity` slots (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots not currently held
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a free slot, giving up when `cancel` fires
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<PoolPermit, PoolError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PoolError::Cancelled),
            permit = Arc::clone(&self.semaphore).acquire_owned() => permit
                .map(|permit| PoolPermit { _permit: permit })
                .map_err(|_| PoolError::Closed),
        }
    }

    /// Take a slot only if one is free right now
    pub fn try_acquire(&self) -> Option<PoolPermit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| PoolPermit { _permit: permit })
    }

    /// Fail current and future waiters
    pub fn close(&self) {
        self.semaphore.close();
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
