// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read loop that forwards decoded events

use lgship_core::{Event, LogReader, ReaderError, Severity, Stop};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// How a poll run ended
#[derive(Debug)]
pub enum PollOutcome {
    /// The reader hit the end of the available data
    Exhausted,
    /// The stop token fired
    Stopped,
    /// A read failed; not retried
    Failed(ReaderError),
    /// The destination channel closed
    Disconnected,
}

/// Drives a reader until it runs dry or is stopped
///
/// Runs on a blocking thread: reads are synchronous and sends use
/// `blocking_send`, so a slow consumer holds the reader back.
pub trait Poller: Send + Sync + 'static {
    fn poll(
        &self,
        reader: &mut LogReader,
        dest: &mpsc::Sender<Event>,
        stop: &CancellationToken,
    ) -> PollOutcome;
}

/// Repeated bounded reads with an optional severity allow-list
#[derive(Debug, Clone)]
pub struct LongPoller {
    pub limit: usize,
    pub timeout: Duration,
    /// Empty allows every severity
    pub allowed_severity: Vec<Severity>,
}

impl Default for LongPoller {
    fn default() -> Self {
        Self {
            limit: 100,
            timeout: Duration::from_secs(1),
            allowed_severity: Vec::new(),
        }
    }
}

impl LongPoller {
    pub fn new(limit: usize, timeout: Duration) -> Self {
        Self {
            limit,
            timeout,
            allowed_severity: Vec::new(),
        }
    }

    pub fn with_severity(mut self, allowed: impl IntoIterator<Item = Severity>) -> Self {
        self.allowed_severity = allowed.into_iter().collect();
        self
    }

    fn allows(&self, severity: &Severity) -> bool {
        self.allowed_severity.is_empty() || self.allowed_severity.contains(severity)
    }
}

impl Poller for LongPoller {
    fn poll(
        &self,
        reader: &mut LogReader,
        dest: &mpsc::Sender<Event>,
        stop: &CancellationToken,
    ) -> PollOutcome {
        loop {
            if stop.is_cancelled() {
                return PollOutcome::Stopped;
            }
            let batch = match reader.read_with_cancel(self.limit, self.timeout, stop) {
                Ok(batch) => batch,
                Err(e) => return PollOutcome::Failed(e),
            };

            // The reader's offset already covers the whole batch, so every
            // event in it is forwarded even if a stop arrived meanwhile
            for event in batch.events {
                if !self.allows(&event.severity) {
                    continue;
                }
                if dest.blocking_send(event).is_err() {
                    return PollOutcome::Disconnected;
                }
            }

            match batch.stop {
                Stop::Limit | Stop::Timeout => continue,
                Stop::EndOfStream => return PollOutcome::Exhausted,
                Stop::Cancelled => return PollOutcome::Stopped,
                Stop::Failed(e) => return PollOutcome::Failed(e),
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
