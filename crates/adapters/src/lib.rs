// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: event sinks and file watching

pub mod sink;
pub mod traced;
pub mod watch;

pub use sink::{JsonLinesSink, Sink, SinkError};
pub use traced::TracedSink;
pub use watch::{FileWatcher, PollWatcher, WatchConfig, WatchError, WatchEvent, WatchOp};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeSink;
#[cfg(any(test, feature = "test-support"))]
pub use watch::{FakeWatcher, WatchCall};
