// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event sinks

mod json;

pub use json::JsonLinesSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;

use async_trait::async_trait;
use lgship_core::Event;
use thiserror::Error;

/// Errors from sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("push failed: {0}")]
    Rejected(String),
}

/// Destination for decoded events
///
/// There is no acknowledgment channel: a sink that needs durability has to
/// provide it itself.
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    async fn push(&self, event: &Event) -> Result<(), SinkError>;

    /// Flush buffered output
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
