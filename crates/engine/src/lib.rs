// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lgship execution engine
//!
//! A [`Manager`] turns file change notifications into per-file
//! [`Exporter`] runs, bounded by a [`WorkerPool`]. Each exporter drives a
//! [`Poller`] over one reader and pushes what it forwards into the sinks.

mod error;
mod exporter;
mod manager;
mod poller;
mod pool;

pub use error::{ExportError, ManagerError, PoolError};
pub use exporter::{ExportReport, Exporter};
pub use manager::{Manager, ManagerConfig};
pub use poller::{LongPoller, PollOutcome, Poller};
pub use pool::{PoolPermit, WorkerPool};

#[cfg(test)]
mod test_helpers;
