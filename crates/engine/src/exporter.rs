// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One reader, one poller, many sinks

use crate::error::ExportError;
use crate::poller::{PollOutcome, Poller};
use lgship_adapters::Sink;
use lgship_core::{Event, LogReader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const CHANNEL_CAPACITY: usize = 64;

/// Result of one exporter run
#[derive(Debug)]
pub struct ExportReport {
    pub path: Option<PathBuf>,
    /// Reader offset when the run ended
    pub offset: u64,
    /// Events handed to the sinks
    pub forwarded: u64,
    pub outcome: PollOutcome,
}

/// Exports one data file
///
/// The poller runs on a blocking thread and feeds a bounded channel; the
/// exporter pushes each event to every sink in order before taking the
/// next, so a slow sink holds back reading of this file.
pub struct Exporter {
    reader: LogReader,
    poller: Option<Arc<dyn Poller>>,
    sinks: Vec<Arc<dyn Sink>>,
    stop: CancellationToken,
}

impl Exporter {
    pub fn new(reader: LogReader) -> Self {
        Self {
            reader,
            poller: None,
            sinks: Vec::new(),
            stop: CancellationToken::new(),
        }
    }

    pub fn with_poller(mut self, poller: Arc<dyn Poller>) -> Self {
        self.poller = Some(poller);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_sinks(mut self, sinks: impl IntoIterator<Item = Arc<dyn Sink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Use an externally owned stop token
    pub fn with_stop(mut self, stop: CancellationToken) -> Self {
        self.stop = stop;
        self
    }

    /// Token that stops this exporter when cancelled
    pub fn stop_handle(&self) -> CancellationToken {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.cancel();
    }

    /// Run until the poller finishes; the reader is closed on return
    pub async fn run(self) -> Result<ExportReport, ExportError> {
        let poller = self.poller.ok_or(ExportError::MissingPoller)?;
        let mut reader = self.reader;
        let path = reader.path().map(|p| p.to_path_buf());
        let start = reader.offset();

        tracing::debug!(path = ?path, offset = start, "export starting");

        let (tx, mut rx) = mpsc::channel::<Event>(CHANNEL_CAPACITY);
        let stop = self.stop.clone();
        let polling = tokio::task::spawn_blocking(move || {
            let outcome = poller.poll(&mut reader, &tx, &stop);
            (reader, outcome)
        });

        let mut forwarded = 0;
        while let Some(event) = rx.recv().await {
            for sink in &self.sinks {
                if let Err(e) = sink.push(&event).await {
                    tracing::warn!(path = ?path, offset = event.offset, error = %e, "sink push failed");
                }
            }
            forwarded += 1;
        }

        let (reader, outcome) = polling.await?;
        let offset = reader.offset();
        drop(reader);

        for sink in &self.sinks {
            if let Err(e) = sink.flush().await {
                tracing::warn!(path = ?path, error = %e, "sink flush failed");
            }
        }

        match &outcome {
            PollOutcome::Failed(e) => {
                tracing::warn!(path = ?path, offset, forwarded, error = %e, "export stopped on read error")
            }
            _ => tracing::info!(path = ?path, from = start, offset, forwarded, outcome = ?outcome, "export finished"),
        }

        Ok(ExportReport {
            path,
            offset,
            forwarded,
            outcome,
        })
    }
}

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;
