// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::sink::{Sink, SinkError};
use async_trait::async_trait;
use lgship_core::Event;
use tracing::Instrument;

/// Wrapper that adds tracing to any Sink
#[derive(Clone)]
pub struct TracedSink<S> {
    name: &'static str,
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(name: &'static str, inner: S) -> Self {
        Self { name, inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: Sink> Sink for TracedSink<S> {
    async fn push(&self, event: &Event) -> Result<(), SinkError> {
        let span = tracing::debug_span!(
            "sink.push",
            sink = self.name,
            offset = event.offset,
            event = %event.event
        );

        async {
            let start = std::time::Instant::now();
            let result = self.inner.push(event).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::trace!(elapsed_ms = elapsed.as_millis() as u64, "pushed"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "push failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn flush(&self) -> Result<(), SinkError> {
        let result = self.inner.flush().await;
        if let Err(e) = &result {
            tracing::warn!(sink = self.name, error = %e, "flush failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
